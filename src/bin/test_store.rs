use chain_state_store::{
    config::Config, AccountBalance, AccountNetwork, Asset, AssetAmount, BlockHeader, ChainStore,
    DataSource, NetworkFamily, NetworkIdentity, Transaction,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    println!("Opening store at {}...", config.database_url);
    let store = ChainStore::open(&config).await?;
    println!("✅ Store opened and initialized!");

    let now = chrono::Utc::now();
    let network = NetworkIdentity::new(NetworkFamily::Evm, "1", "mainnet")?;
    let account = "0x52908400098527886E0F7030069857D2E4169EE7";

    // Registry
    store.add_account(&AccountNetwork::new(account, network.clone())?).await?;
    println!("✅ Tracking {} account(s)", store.list_accounts().await?.len());

    // Blocks
    let block_hash = format!("0xsmoke_block_{}", now.timestamp_millis());
    let header = BlockHeader::new(&block_hash, "0xsmoke_parent", 1, now, network.clone())?;
    store.add_block(&header).await?;
    match store.get_latest_block(&network).await? {
        Some(latest) => println!("✅ Latest block: {} at {}", latest.hash, latest.timestamp),
        None => println!("❌ No latest block found"),
    }

    // Transactions: pending, then confirmed
    let tx_hash = format!("0xsmoke_tx_{}", now.timestamp_millis());
    let tx = Transaction::new(&tx_hash, account, network.clone())?;
    let outcome = store.add_or_update_transaction(&tx, DataSource::Local).await?;
    println!("✅ Pending transaction {:?}", outcome);

    let outcome = store
        .add_or_update_transaction(&tx.with_block(&block_hash, 1), DataSource::Remote)
        .await?;
    println!("✅ Confirmed transaction {:?}", outcome);

    if let Some(record) = store.get_transaction(&network, &tx_hash).await? {
        println!(
            "Transaction {} in block {:?}, first seen {} ({})",
            record.transaction.hash,
            record.transaction.block_hash,
            record.first_seen,
            record.data_source
        );
    }

    // Balances
    let balance = AccountBalance::new(
        account,
        network.clone(),
        AssetAmount {
            amount: "1000000000000000000".to_string(),
            asset: Asset::new("ETH", 18),
        },
        1,
        now,
    )?;
    store.record_balance(&balance).await?;
    match store.get_latest_balance(account, &network, "ETH").await? {
        Some(latest) => println!("✅ Latest ETH balance: {}", latest.asset_amount.amount),
        None => println!("❌ No fresh balance found"),
    }

    println!("All store checks completed successfully!");
    Ok(())
}
