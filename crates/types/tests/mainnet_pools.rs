use alloy_primitives::{address, b256, Address};
use assert_matches::assert_matches;
use pool_types::{
    make_pool_key, pool_id,
    v3::{compute_v3_pool_address, v3_tick_spacing},
    PoolConfig, PoolMathError
};
use testing_tools::{random_pair, random_pool_config, DAI, USDC, V3_FACTORY, WETH};

#[test]
fn v4_pool_ids_for_mainnet_pairs() {
    let key = make_pool_key(WETH, USDC, 3000, 60, Address::ZERO).unwrap();
    assert_eq!(key.currency0(), USDC);
    assert_eq!(
        pool_id(&key),
        b256!("b9fd8b8b6580b80432037a379071b6fb22bbceff6bafbd57390889c01d8757b9")
    );

    let key = make_pool_key(USDC, DAI, 100, 1, Address::ZERO).unwrap();
    assert_eq!(key.currency0(), DAI);
    assert_eq!(
        key.pool_id(),
        b256!("d967702f17f83d907b36e66c9a62eb50ac327432c581d5b273a76519692434be")
    );
}

#[test]
fn default_config_is_the_thirty_bip_pool() {
    let key = PoolConfig::default().pool_key(USDC, WETH).unwrap();
    assert_eq!(
        key.pool_id(),
        b256!("b9fd8b8b6580b80432037a379071b6fb22bbceff6bafbd57390889c01d8757b9")
    );
}

#[test]
fn v3_pool_addresses_for_mainnet_pairs() {
    for (token_a, token_b, fee, expected) in [
        (WETH, USDC, 500, address!("88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640")),
        (USDC, WETH, 3000, address!("8ad599c3A0ff1De082011EFDDc58f1908eb6e6D8")),
        (USDC, DAI, 100, address!("5777d92f208679DB4b9778590Fa3CAB3aC9e2168"))
    ] {
        assert_eq!(compute_v3_pool_address(V3_FACTORY, token_a, token_b, fee).unwrap(), expected);
        assert!(v3_tick_spacing(fee).is_some());
    }
}

#[test]
fn pool_id_ignores_argument_order_for_random_pairs() {
    let mut rng = rand::thread_rng();
    for _ in 0..64 {
        let (token_a, token_b) = random_pair(&mut rng);
        let config = random_pool_config(&mut rng);

        let forward = config.pool_key(token_a, token_b).unwrap();
        let backward = config.pool_key(token_b, token_a).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.pool_id(), backward.pool_id());
        assert!(forward.currency0() < forward.currency1());
    }
}

#[test]
fn same_token_twice_is_rejected() {
    assert_matches!(
        make_pool_key(USDC, USDC, 3000, 60, Address::ZERO),
        Err(PoolMathError::InvalidInput(_))
    );
}
