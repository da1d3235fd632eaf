//! Tests for mnemonic handling and key derivation

use tron_wallet::account::{generate_batch, Address, MAX_BATCH_SIZE};
use tron_wallet::crypto::keys::*;
use tron_wallet::crypto::mnemonic::*;

const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

#[test]
fn test_tron_key_derivation() {
    let seed = mnemonic_to_seed(PHRASE, None).unwrap();

    let pair = derive_key_pair(&seed, &DerivationPath::account_path(0)).unwrap();
    let address = Address::from_public_key(pair.public_key());

    let text = address.to_base58();
    assert!(text.starts_with('T'));
    assert_eq!(text.len(), 34);

    // Recovery: the same phrase and path always reproduce the same key
    let again = derive_key_pair(&seed, &DerivationPath::account_path(0)).unwrap();
    assert_eq!(pair.private_key(), again.private_key());
    assert_eq!(address, Address::from_public_key(again.public_key()));
}

#[test]
fn test_passphrase_changes_derived_key() {
    let plain = mnemonic_to_seed(PHRASE, None).unwrap();
    let salted = mnemonic_to_seed(PHRASE, Some("TREZOR")).unwrap();

    let path = DerivationPath::account_path(0);
    let a = derive_key_pair(&plain, &path).unwrap();
    let b = derive_key_pair(&salted, &path).unwrap();
    assert_ne!(a.private_key(), b.private_key());
}

#[test]
fn test_generated_mnemonic_derives_end_to_end() {
    let phrase = generate_mnemonic(MnemonicStrength::Words24).unwrap();
    validate_mnemonic(&phrase).unwrap();

    let seed = mnemonic_to_seed(&phrase, None).unwrap();
    let pair = derive_key_pair(&seed, &DerivationPath::account_path(0)).unwrap();

    // The derived key round-trips through its hex form
    let reparsed = parse_private_key(&pair.private_key().to_hex()).unwrap();
    assert_eq!(&reparsed, pair.private_key());
}

#[test]
fn test_batch_pagination_contract() {
    let first_page = generate_batch(PHRASE, None, 0, 5).unwrap();
    let second_page = generate_batch(PHRASE, None, 5, 5).unwrap();

    let indices: Vec<u32> = first_page
        .iter()
        .chain(second_page.iter())
        .map(|e| e.index)
        .collect();
    assert_eq!(indices, (0..10).collect::<Vec<u32>>());

    // Adjacent pages never overlap or repeat addresses
    let addresses: std::collections::HashSet<String> = first_page
        .iter()
        .chain(second_page.iter())
        .map(|e| e.address.to_base58())
        .collect();
    assert_eq!(addresses.len(), 10);
}

#[test]
fn test_batch_clamp() {
    let entries = generate_batch(PHRASE, None, 0, 500).unwrap();
    assert_eq!(entries.len(), MAX_BATCH_SIZE as usize);
}
