//! Helpers shared by the unit tests

use std::{fs, path::PathBuf};

use alloy::{
    primitives::{Address, Bytes, B256},
    providers::{mock::Asserter, DynProvider, ProviderBuilder},
    sol_types::SolValue,
};
use serde_json::{json, Value};

use crate::types::Wallet;

/// A fresh scratch directory for a test
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sov-reign-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// A provider answering every request from `asserter`, in order.
///
/// No fillers are installed, so sending a transaction costs exactly one
/// `eth_sendTransaction` followed by the receipt lookups.
pub fn mock_provider(asserter: &Asserter) -> Wallet {
    DynProvider::new(
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone()),
    )
}

/// Queue the return data of an `eth_call`
pub fn push_call_return<T: SolValue>(asserter: &Asserter, value: T) {
    asserter.push_success(&Bytes::from(value.abi_encode()));
}

/// Queue the responses of a transaction that gets mined with `status`,
/// returning its hash
pub fn push_mined_tx(asserter: &Asserter, index: u8, status: bool) -> B256 {
    push_mined_tx_with_address(asserter, index, status, None)
}

/// Queue the responses of a successful contract creation
pub fn push_deployment(asserter: &Asserter, index: u8, address: Address) -> B256 {
    push_mined_tx_with_address(asserter, index, true, Some(address))
}

/// Queue a transaction hash and then a receipt for it
fn push_mined_tx_with_address(
    asserter: &Asserter,
    index: u8,
    status: bool,
    contract_address: Option<Address>,
) -> B256 {
    let tx_hash = B256::repeat_byte(index);
    asserter.push_success(&tx_hash);
    asserter.push_success(&receipt_json(tx_hash, status, contract_address));
    tx_hash
}

/// A minimal EIP-1559 receipt
pub fn receipt_json(tx_hash: B256, status: bool, contract_address: Option<Address>) -> Value {
    json!({
        "type": "0x2",
        "status": if status { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0x5208",
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": B256::repeat_byte(0xbb),
        "blockNumber": "0x1",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x1",
        "from": Address::repeat_byte(0xaa),
        "to": Value::Null,
        "contractAddress": contract_address,
    })
}

/// The four byte selector of a transaction's calldata
pub fn selector_of(input: &Bytes) -> [u8; 4] {
    input[..4].try_into().unwrap()
}
