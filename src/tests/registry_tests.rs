#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        error::StoreError,
        models::AccountNetwork,
        store::ChainStore,
        tests::{count_rows, mainnet, sepolia, setup, solana, ACCOUNT_A, ACCOUNT_B, SOLANA_ACCOUNT},
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    fn sorted(mut entries: Vec<AccountNetwork>) -> Vec<AccountNetwork> {
        entries.sort_by(|a, b| (&a.network.name, &a.account).cmp(&(&b.network.name, &b.account)));
        entries
    }

    #[tokio::test]
    async fn test_add_one_is_idempotent() {
        let store = setup().await;
        let entry = AccountNetwork::new(ACCOUNT_A, mainnet()).unwrap();

        store.add_account(&entry).await.unwrap();
        store.add_account(&entry).await.unwrap();

        assert_eq!(store.list_accounts().await.unwrap(), vec![entry]);
        assert_eq!(count_rows(&store, "account_networks").await, 1);
    }

    #[tokio::test]
    async fn test_same_account_on_two_networks() {
        let store = setup().await;

        store.add_account(&AccountNetwork::new(ACCOUNT_A, mainnet()).unwrap()).await.unwrap();
        store.add_account(&AccountNetwork::new(ACCOUNT_A, sepolia()).unwrap()).await.unwrap();

        assert_eq!(store.list_accounts().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_replace_all_swaps_the_registry() {
        let store = setup().await;
        store.add_account(&AccountNetwork::new(ACCOUNT_A, mainnet()).unwrap()).await.unwrap();
        store.add_account(&AccountNetwork::new(ACCOUNT_B, mainnet()).unwrap()).await.unwrap();

        let replacement = vec![
            AccountNetwork::new(ACCOUNT_B, sepolia()).unwrap(),
            AccountNetwork::new(SOLANA_ACCOUNT, solana()).unwrap(),
        ];
        store.replace_accounts(&replacement).await.unwrap();

        assert_eq!(store.list_accounts().await.unwrap(), sorted(replacement));

        store.replace_accounts(&[]).await.unwrap();
        assert!(store.list_accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_replace_leaves_registry_untouched() {
        let store = setup().await;
        let existing = AccountNetwork::new(ACCOUNT_A, mainnet()).unwrap();
        store.add_account(&existing).await.unwrap();

        // Solana address on an EVM network
        let invalid = AccountNetwork {
            account: SOLANA_ACCOUNT.to_string(),
            network: mainnet(),
        };
        let err = store
            .replace_accounts(&[AccountNetwork::new(ACCOUNT_B, mainnet()).unwrap(), invalid])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.list_accounts().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn test_readers_never_see_partial_replace() {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let path = std::env::temp_dir().join(format!("chain_state_replace_{}_{}.db", std::process::id(), nanos));
        let config = Config {
            database_url: format!("sqlite:{}", path.display()),
            db_max_connections: 4,
            ..Config::default()
        };
        let store = ChainStore::open(&config).await.unwrap();

        let set_a = sorted(vec![
            AccountNetwork::new(ACCOUNT_A, mainnet()).unwrap(),
            AccountNetwork::new(ACCOUNT_B, mainnet()).unwrap(),
            AccountNetwork::new(ACCOUNT_A, sepolia()).unwrap(),
        ]);
        let set_b = sorted(vec![
            AccountNetwork::new(SOLANA_ACCOUNT, solana()).unwrap(),
            AccountNetwork::new(ACCOUNT_B, sepolia()).unwrap(),
        ]);
        store.replace_accounts(&set_a).await.unwrap();

        let writer = {
            let store = store.clone();
            let (set_a, set_b) = (set_a.clone(), set_b.clone());
            tokio::spawn(async move {
                for i in 0..50 {
                    let next = if i % 2 == 0 { &set_b } else { &set_a };
                    store.replace_accounts(next).await.unwrap();
                    tokio::task::yield_now().await;
                }
            })
        };

        let readers: Vec<_> = (0..3)
            .map(|_| {
                let store = store.clone();
                let (set_a, set_b) = (set_a.clone(), set_b.clone());
                tokio::spawn(async move {
                    for _ in 0..100 {
                        let seen = store.list_accounts().await.unwrap();
                        assert!(
                            seen == set_a || seen == set_b,
                            "Observed a partially replaced registry: {seen:?}"
                        );
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }

        // 50 swaps starting from A end on A
        assert_eq!(store.list_accounts().await.unwrap(), set_a);

        store.pool().close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }
}
