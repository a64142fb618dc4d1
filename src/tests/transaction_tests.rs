#[cfg(test)]
mod tests {
    use crate::{
        error::StoreError,
        models::{DataSource, Transaction, UpsertOutcome},
        tests::{count_rows, mainnet, sepolia, setup, ACCOUNT_A, ACCOUNT_B},
    };
    use serde_json::json;

    fn pending(hash: &str) -> Transaction {
        let mut tx = Transaction::new(hash, ACCOUNT_A, mainnet()).unwrap();
        tx.to = Some(ACCOUNT_B.to_string());
        tx.nonce = Some(42);
        tx
    }

    #[tokio::test]
    async fn test_pending_then_confirmed_scenario() {
        let store = setup().await;

        let outcome = store
            .add_or_update_transaction(&pending("0xA"), DataSource::Local)
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let first = store.get_transaction(&mainnet(), "0xA").await.unwrap().unwrap();
        assert_eq!(first.transaction.block_height, None);
        assert_eq!(first.data_source, DataSource::Local);

        let confirmed = pending("0xA").with_block("0xB", 100);
        let outcome = store
            .add_or_update_transaction(&confirmed, DataSource::Remote)
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Merged);

        let second = store.get_transaction(&mainnet(), "0xA").await.unwrap().unwrap();
        assert_eq!(second.transaction.block_height, Some(100));
        assert_eq!(second.transaction.block_hash.as_deref(), Some("0xB"));
        assert_eq!(second.data_source, DataSource::Local, "Provenance is set once");
        assert_eq!(second.first_seen, first.first_seen, "firstSeen is set once");
        assert_eq!(count_rows(&store, "transactions").await, 1);
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let store = setup().await;
        let tx = pending("0xidem").with_block("0xblock", 7);

        store.add_or_update_transaction(&tx, DataSource::Remote).await.unwrap();
        let after_first = store.get_transaction(&mainnet(), "0xidem").await.unwrap();

        store.add_or_update_transaction(&tx, DataSource::Remote).await.unwrap();
        let after_second = store.get_transaction(&mainnet(), "0xidem").await.unwrap();

        assert_eq!(after_first, after_second);
        assert_eq!(count_rows(&store, "transactions").await, 1);
    }

    #[tokio::test]
    async fn test_merge_only_touches_block_association() {
        let store = setup().await;
        let mut original = pending("0xmerge");
        original.extra.insert("gasPrice".to_string(), json!("1000000000"));
        store.add_or_update_transaction(&original, DataSource::Local).await.unwrap();

        // A later observation that disagrees on every other field
        let mut update = Transaction::new("0xmerge", ACCOUNT_B, mainnet())
            .unwrap()
            .with_block("0xblock", 12);
        update.nonce = Some(1);
        update.extra.insert("gasPrice".to_string(), json!("5"));
        store.add_or_update_transaction(&update, DataSource::Remote).await.unwrap();

        let stored = store.get_transaction(&mainnet(), "0xmerge").await.unwrap().unwrap();
        assert_eq!(stored.transaction.from, ACCOUNT_A);
        assert_eq!(stored.transaction.to.as_deref(), Some(ACCOUNT_B));
        assert_eq!(stored.transaction.nonce, Some(42));
        assert_eq!(stored.transaction.extra["gasPrice"], json!("1000000000"));
        assert_eq!(stored.transaction.block_hash.as_deref(), Some("0xblock"));
        assert_eq!(stored.transaction.block_height, Some(12));
        assert_eq!(stored.data_source, DataSource::Local);
    }

    #[tokio::test]
    async fn test_stale_block_association_wins_when_written_last() {
        let store = setup().await;

        store
            .add_or_update_transaction(&pending("0xstale").with_block("0xnew", 200), DataSource::Remote)
            .await
            .unwrap();
        store
            .add_or_update_transaction(&pending("0xstale").with_block("0xold", 150), DataSource::Remote)
            .await
            .unwrap();

        let stored = store.get_transaction(&mainnet(), "0xstale").await.unwrap().unwrap();
        assert_eq!(stored.transaction.block_hash.as_deref(), Some("0xold"));
        assert_eq!(stored.transaction.block_height, Some(150));
    }

    #[tokio::test]
    async fn test_lookup_is_keyed_by_hash_and_network() {
        let store = setup().await;

        store.add_or_update_transaction(&pending("0xshared"), DataSource::Remote).await.unwrap();

        let mut other = Transaction::new("0xshared", ACCOUNT_B, sepolia()).unwrap();
        other.nonce = Some(3);
        let outcome = store.add_or_update_transaction(&other, DataSource::Local).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let on_mainnet = store.get_transaction(&mainnet(), "0xshared").await.unwrap().unwrap();
        let on_sepolia = store.get_transaction(&sepolia(), "0xshared").await.unwrap().unwrap();
        assert_eq!(on_mainnet.transaction.from, ACCOUNT_A);
        assert_eq!(on_sepolia.transaction.from, ACCOUNT_B);
        assert_eq!(on_sepolia.data_source, DataSource::Local);

        assert!(store.get_transaction(&mainnet(), "0xmissing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_plain_insert_rejects_duplicates() {
        let store = setup().await;

        store.insert_transaction(&pending("0xplain"), DataSource::Remote).await.unwrap();
        let err = store
            .insert_transaction(&pending("0xplain").with_block("0xb", 1), DataSource::Remote)
            .await
            .unwrap_err();

        assert!(err.is_constraint_violation(), "got {err:?}");
        let stored = store.get_transaction(&mainnet(), "0xplain").await.unwrap().unwrap();
        assert_eq!(stored.transaction.block_hash, None);
    }

    #[tokio::test]
    async fn test_invalid_transaction_is_rejected() {
        let store = setup().await;
        let mut tx = pending("0xbad");
        tx.hash = "   ".to_string();

        let err = store.add_or_update_transaction(&tx, DataSource::Local).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(count_rows(&store, "transactions").await, 0);
    }
}
