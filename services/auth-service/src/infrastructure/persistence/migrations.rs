//! 内置数据库迁移

use authgate_adapter_postgres::Migration;

/// 按版本顺序列出的全部迁移
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(
        1,
        "create_auths",
        include_str!("../../../migrations/0001_create_auths.sql"),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_unique_and_ordered() {
        let migrations = migrations();
        let versions: Vec<i64> = migrations.iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(versions, sorted);
    }

    #[test]
    fn test_schema_carries_uniqueness_backstop() {
        let migrations = migrations();
        let sql = &migrations[0].up_sql;
        assert!(sql.contains("auths_identifier_unique"));
        assert!(sql.contains("user_id TEXT PRIMARY KEY"));
        assert!(sql.contains("ON DELETE CASCADE"));
    }
}
