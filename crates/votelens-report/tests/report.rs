//! End-to-end pipeline tests over an in-memory chain.
//!
//! A small fake world (bytecode map + ABI map + one vote) drives the
//! whole inspector: script decode → enrichment → tally.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use votelens_core::{
    AbiFunction, AbiSource, AccountKind, AddressInfo, ArgValue, ChainClient, Interface,
    ReportError, SourceError, SourceVerification, Verification, VoteRecord, VoteStatus,
};
use votelens_report::VoteInspector;

const PCT_BASE: u128 = 1_000_000_000_000_000_000;

const TOKEN_ABI: &str = r#"[
    {"name": "transfer", "type": "function",
     "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}],
     "outputs": [{"name": "", "type": "bool"}], "stateMutability": "nonpayable"}
]"#;

const PROXY_ABI: &str = r#"[
    {"name": "implementation", "type": "function", "inputs": [],
     "outputs": [{"name": "", "type": "address"}], "stateMutability": "view"}
]"#;

struct FakeChain {
    votes: HashMap<u64, VoteRecord>,
    code: HashMap<String, Vec<u8>>,
    abis: HashMap<String, String>,
    implementations: HashMap<String, String>,
}

impl FakeChain {
    fn into_pair(self) -> (Arc<Self>, Arc<Self>) {
        let arc = Arc::new(self);
        (arc.clone(), arc)
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn vote_record(&self, id: u64) -> Result<VoteRecord, SourceError> {
        self.votes
            .get(&id)
            .cloned()
            .ok_or_else(|| SourceError::Lookup { reason: format!("no vote {id}") })
    }

    async fn vote_count(&self) -> Result<u64, SourceError> {
        Ok(self.votes.len() as u64)
    }

    async fn pct_base(&self) -> Result<u128, SourceError> {
        Ok(PCT_BASE)
    }

    async fn bytecode(&self, address: &str) -> Result<Vec<u8>, SourceError> {
        Ok(self.code.get(address).cloned().unwrap_or_default())
    }

    async fn call_address_getter(
        &self,
        address: &str,
        _function: &AbiFunction,
    ) -> Result<String, SourceError> {
        self.implementations
            .get(address)
            .cloned()
            .ok_or_else(|| SourceError::Lookup { reason: format!("{address} is not a proxy") })
    }
}

#[async_trait]
impl AbiSource for FakeChain {
    async fn interface(&self, address: &str) -> Result<Option<Interface>, SourceError> {
        self.abis
            .get(address)
            .map(|json| Interface::from_abi_json(json))
            .transpose()
            .map_err(|e| SourceError::InvalidAbi { provider: "fake".into(), reason: e.to_string() })
    }

    async fn verification(&self, _address: &str) -> Result<SourceVerification, SourceError> {
        Ok(SourceVerification::Verified)
    }
}

fn addr(byte: u8) -> String {
    format!("0x{}", hex::encode([byte; 20]))
}

fn segment(target_byte: u8, calldata: &[u8]) -> Vec<u8> {
    let mut out = vec![target_byte; 20];
    out.extend_from_slice(&(calldata.len() as u32).to_be_bytes());
    out.extend_from_slice(calldata);
    out
}

fn transfer_calldata(to_byte: u8, amount: u64) -> Vec<u8> {
    let mut data = hex::decode("a9059cbb").unwrap();
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(&[to_byte; 20]);
    data.extend_from_slice(&word);
    let mut amt = [0u8; 32];
    amt[24..].copy_from_slice(&amount.to_be_bytes());
    data.extend_from_slice(&amt);
    data
}

fn vote(id: u64, open: bool, executed: bool, script: Vec<u8>) -> VoteRecord {
    VoteRecord {
        id,
        open,
        executed,
        start_date: 1_700_000_000,
        snapshot_block: 19_000_000,
        support_required: PCT_BASE / 2,
        min_accept_quorum: PCT_BASE / 20,
        yea: 60 * PCT_BASE,
        nay: 40 * PCT_BASE,
        voting_power: 100 * PCT_BASE,
        script,
    }
}

#[tokio::test]
async fn open_vote_reports_in_progress() {
    let (chain, source) = FakeChain {
        votes: HashMap::from([(0, vote(0, true, false, vec![]))]),
        code: HashMap::new(),
        abis: HashMap::new(),
        implementations: HashMap::new(),
    }
    .into_pair();

    let report = VoteInspector::new(chain, source).report(0).await.unwrap();
    assert_eq!(report.status, VoteStatus::InProgress);
    assert!(report.calls.is_empty());
}

#[tokio::test]
async fn eoa_target_with_raw_calldata() {
    // single-segment script targeting an EOA with calldata 0xdeadbeef
    let script = segment(0x11, &[0xde, 0xad, 0xbe, 0xef]);
    let (chain, source) = FakeChain {
        votes: HashMap::from([(7, vote(7, false, true, script))]),
        code: HashMap::new(),
        abis: HashMap::new(),
        implementations: HashMap::new(),
    }
    .into_pair();

    let report = VoteInspector::new(chain, source).report(7).await.unwrap();
    assert_eq!(report.calls.len(), 1);

    let call = &report.calls[0];
    assert_eq!(call.address_info, AddressInfo::eoa(addr(0x11)));
    assert!(call.method.is_none());
    assert_eq!(call.args, vec![ArgValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef])]);
}

#[tokio::test]
async fn proxy_target_decodes_through_implementation() {
    let proxy = addr(0xaa);
    let implementation = addr(0xbb);
    let script = {
        let mut s = vec![0x00, 0x00, 0x00, 0x01]; // CallsScript marker
        s.extend(segment(0xaa, &transfer_calldata(0x22, 1_000_000)));
        s
    };

    let (chain, source) = FakeChain {
        votes: HashMap::from([(1, vote(1, false, true, script))]),
        code: HashMap::from([(proxy.clone(), vec![0x60]), (implementation.clone(), vec![0x60])]),
        abis: HashMap::from([
            (proxy.clone(), PROXY_ABI.to_string()),
            (implementation, TOKEN_ABI.to_string()),
        ]),
        implementations: HashMap::from([(proxy, addr(0xbb))]),
    }
    .into_pair();

    let report = VoteInspector::new(chain, source).report(1).await.unwrap();
    assert_eq!(report.status, VoteStatus::Enacted);
    assert_eq!(report.calls.len(), 1);

    let call = &report.calls[0];
    assert_eq!(call.method.as_deref(), Some("transfer"));
    assert_eq!(call.address_info.kind, AccountKind::Contract);
    assert_eq!(call.address_info.verified, Some(Verification::Verified));

    match &call.args[0] {
        ArgValue::Account(info) => {
            assert_eq!(info.address, addr(0x22));
            assert_eq!(info.kind, AccountKind::Eoa);
        }
        other => panic!("expected account substitution, got {other:?}"),
    }
    assert_eq!(call.args[1], ArgValue::Uint(1_000_000));
}

#[tokio::test]
async fn call_order_matches_script_order() {
    let mut script = Vec::new();
    for b in [0x31u8, 0x32, 0x33, 0x34, 0x35] {
        script.extend(segment(b, &[b]));
    }
    let (chain, source) = FakeChain {
        votes: HashMap::from([(2, vote(2, false, false, script))]),
        code: HashMap::new(),
        abis: HashMap::new(),
        implementations: HashMap::new(),
    }
    .into_pair();

    let report = VoteInspector::new(chain, source).report(2).await.unwrap();
    let targets: Vec<_> = report.calls.iter().map(|c| c.address_info.address.clone()).collect();
    assert_eq!(targets, vec![addr(0x31), addr(0x32), addr(0x33), addr(0x34), addr(0x35)]);
}

#[tokio::test]
async fn truncated_script_aborts_the_report() {
    let mut script = segment(0x11, &[0x01, 0x02]);
    script.truncate(script.len() - 1);
    let (chain, source) = FakeChain {
        votes: HashMap::from([(3, vote(3, false, false, script))]),
        code: HashMap::new(),
        abis: HashMap::new(),
        implementations: HashMap::new(),
    }
    .into_pair();

    let err = VoteInspector::new(chain, source).report(3).await.unwrap_err();
    assert!(matches!(err, ReportError::MalformedScript(_)));
}

#[tokio::test]
async fn missing_vote_is_a_lookup_failure() {
    let (chain, source) = FakeChain {
        votes: HashMap::new(),
        code: HashMap::new(),
        abis: HashMap::new(),
        implementations: HashMap::new(),
    }
    .into_pair();

    let err = VoteInspector::new(chain, source).report(42).await.unwrap_err();
    assert!(matches!(err, ReportError::VoteLookup { id: 42, .. }));
}

#[tokio::test]
async fn report_all_walks_every_vote() {
    let (chain, source) = FakeChain {
        votes: HashMap::from([
            (0, vote(0, true, false, vec![])),
            (1, vote(1, false, true, vec![])),
        ]),
        code: HashMap::new(),
        abis: HashMap::new(),
        implementations: HashMap::new(),
    }
    .into_pair();

    let reports = VoteInspector::new(chain, source).report_all().await.unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].id, 0);
    assert_eq!(reports[1].id, 1);
    assert_eq!(reports[0].status, VoteStatus::InProgress);
    assert_eq!(reports[1].status, VoteStatus::Enacted);
}
