//! SQL for the two union queries
//!
//! Locate and expand run the same shape of query: a reference half
//! unioned with a symbol half over `file` ⋈ `group_` ⋈ (`reference` |
//! `symbol`). Both halves are built from one template per query so the
//! two strings cannot drift apart.

/// One half of the resolution-at-location query, selecting only the
/// resolution id. Binds lowercaseFilename, filename, directory, line
/// and column, in that order.
fn usr_at_location_half(relation: &str) -> String {
    format!(
        "select x.resolution from file f \
         inner join group_ g on (f.id = g.file) \
         inner join {} x on (g.id = x.group_) \
         where f.lowercaseFilename = ? and f.filename = ? and f.directory = ? \
         and x.lineNumber = ? and x.column = ?",
        relation
    )
}

/// One half of the expansion query, selecting filename id, directory
/// id, line, column, kind id and a literal discriminator telling the
/// decoder which relation the row came from. Binds the resolution id.
fn entities_for_usr_half(relation: &str, discriminator: u8) -> String {
    format!(
        "select f.filename, f.directory, x.lineNumber, x.column, x.kind, {} \
         from {} x \
         inner join group_ g on (g.id = x.group_) \
         inner join file f on (f.id = g.file) \
         where x.resolution = ?",
        discriminator, relation
    )
}

/// Query for [`locate`]: location keys → resolution ids. Parameters
/// are the five location keys, bound once per half.
///
/// [`locate`]: crate::IndexDb::usr_at_location
pub(crate) fn usr_at_location_sql() -> String {
    format!(
        "{} union {}",
        usr_at_location_half("reference"),
        usr_at_location_half("symbol")
    )
}

/// Query for [`expand`]: resolution id → site rows, references with
/// discriminator 0, declarations with 1. The resolution id binds once
/// per half.
///
/// [`expand`]: crate::IndexDb::entities_for_usr
pub(crate) fn entities_for_usr_sql() -> String {
    format!(
        "{} union {}",
        entities_for_usr_half("reference", 0),
        entities_for_usr_half("symbol", 1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_binds_five_keys_per_half() {
        let sql = usr_at_location_sql();
        assert_eq!(sql.matches('?').count(), 10);
        assert_eq!(sql.matches(" union ").count(), 1);
    }

    #[test]
    fn test_expand_binds_resolution_per_half() {
        let sql = entities_for_usr_sql();
        assert_eq!(sql.matches('?').count(), 2);
        assert_eq!(sql.matches(" union ").count(), 1);
    }

    #[test]
    fn test_halves_differ_only_in_relation_and_discriminator() {
        let sql = usr_at_location_sql();
        let (reference, symbol) = sql.split_once(" union ").unwrap();
        assert_eq!(
            reference.replace("reference", "symbol"),
            symbol
        );

        let sql = entities_for_usr_sql();
        let (reference, symbol) = sql.split_once(" union ").unwrap();
        assert!(reference.contains("reference x"));
        assert!(symbol.contains("symbol x"));
    }
}
