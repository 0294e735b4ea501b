use redb::TableDefinition;

/// Key-value table: storage key -> JSON-encoded collection bytes
pub const KV: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");
