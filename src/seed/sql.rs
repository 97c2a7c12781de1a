//! SQL statement emission for the seed dataset

use super::dedup::DedupIndex;
use super::source::SynthesizedRecord;
use crate::error::Result;
use std::io::Write;

/// Schema for the three tables, tables first, then their indexes
pub const SCHEMA_DDL: &str = "\
CREATE TABLE users (
  id SERIAL PRIMARY KEY,
  name VARCHAR(255) NULL,
  email TEXT NOT NULL UNIQUE,
  mobile TEXT NULL UNIQUE,
  city INTEGER,
  country INTEGER
);

CREATE TABLE cities (
  id SERIAL PRIMARY KEY,
  name VARCHAR(255) NOT NULL
);

CREATE TABLE countries (
  id SERIAL PRIMARY KEY,
  name VARCHAR(255) NOT NULL
);

CREATE INDEX users_id ON users (id);

CREATE INDEX cities_id ON cities (id);

CREATE INDEX countries_id ON countries (id);
";

/// Escape a string for embedding in a single-quoted SQL literal.
///
/// Doubling embedded quotes is the only injection defense available in a
/// plain-text seed file; values never break out of their literal.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// INSERT statement for one deduplicated city
pub fn insert_city(name: &str) -> String {
    format!("INSERT INTO cities (name) VALUES ('{}');", escape_literal(name))
}

/// INSERT statement for one deduplicated country
pub fn insert_country(name: &str) -> String {
    format!(
        "INSERT INTO countries (name) VALUES ('{}');",
        escape_literal(name)
    )
}

/// INSERT statement for one user, referencing lookup surrogate ids
pub fn insert_user(record: &SynthesizedRecord, city_id: u32, country_id: u32) -> String {
    format!(
        "INSERT INTO users (name, email, mobile, city, country) VALUES ('{}', '{}', '{}', {}, {});",
        escape_literal(&record.full_name),
        escape_literal(&record.email),
        escape_literal(&record.phone),
        city_id,
        country_id
    )
}

/// Counts of emitted statements, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlSummary {
    pub cities: usize,
    pub countries: usize,
    pub users: usize,
}

/// Emit the full seed script: DDL, city inserts, country inserts, user
/// inserts.
///
/// Referential integrity holds by emission order: both lookup indexes are
/// fully populated before the first users INSERT is written, so every
/// referenced surrogate id already exists earlier in the stream.
pub fn write_script<W: Write>(records: &[SynthesizedRecord], writer: &mut W) -> Result<SqlSummary> {
    let mut cities = DedupIndex::new();
    let mut countries = DedupIndex::new();

    for record in records {
        cities.insert(&record.city);
        countries.insert(&record.country);
    }

    writeln!(writer, "{}", SCHEMA_DDL)?;

    for city in cities.names() {
        writeln!(writer, "{}", insert_city(city))?;
    }

    for country in countries.names() {
        writeln!(writer, "{}", insert_country(country))?;
    }

    for record in records {
        // Both lookups were fed from this record, so the ids exist
        let city_id = cities.id_of(&record.city).unwrap_or(0);
        let country_id = countries.id_of(&record.country).unwrap_or(0);
        writeln!(writer, "{}", insert_user(record, city_id, country_id))?;
    }

    Ok(SqlSummary {
        cities: cities.len(),
        countries: countries.len(),
        users: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, city: &str, country: &str) -> SynthesizedRecord {
        SynthesizedRecord {
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "0700-000000".to_string(),
            city: city.to_string(),
            country: country.to_string(),
        }
    }

    #[test]
    fn test_escape_literal_doubles_quotes() {
        assert_eq!(escape_literal("O'Brien"), "O''Brien");
        assert_eq!(escape_literal("plain"), "plain");
        assert_eq!(escape_literal("a'b'c"), "a''b''c");
    }

    #[test]
    fn test_city_insert_statement() {
        assert_eq!(
            insert_city("Saint-Étienne"),
            "INSERT INTO cities (name) VALUES ('Saint-Étienne');"
        );
    }

    #[test]
    fn test_user_insert_references_ids() {
        let statement = insert_user(&record("Jean Martin", "Lyon", "France"), 3, 1);
        assert_eq!(
            statement,
            "INSERT INTO users (name, email, mobile, city, country) VALUES \
             ('Jean Martin', 'jean.martin@example.com', '0700-000000', 3, 1);"
        );
    }

    #[test]
    fn test_user_insert_escapes_name() {
        let statement = insert_user(&record("Conor O'Brien", "Cork", "Ireland"), 1, 1);
        assert!(statement.contains("'Conor O''Brien'"));
    }

    #[test]
    fn test_schema_has_three_tables_and_three_indexes() {
        assert_eq!(SCHEMA_DDL.matches("CREATE TABLE").count(), 3);
        assert_eq!(SCHEMA_DDL.matches("CREATE INDEX").count(), 3);
        // Each index targets its own table
        assert!(SCHEMA_DDL.contains("CREATE INDEX cities_id ON cities (id);"));
        assert!(SCHEMA_DDL.contains("CREATE INDEX countries_id ON countries (id);"));
        assert!(SCHEMA_DDL.contains("CREATE INDEX users_id ON users (id);"));
    }

    #[test]
    fn test_write_script_ordering_and_counts() {
        let records = vec![
            record("A One", "Paris", "France"),
            record("B Two", "Lyon", "France"),
            record("C Three", "Paris", "France"),
        ];

        let mut buffer = Vec::new();
        let summary = write_script(&records, &mut buffer).unwrap();
        let script = String::from_utf8(buffer).unwrap();

        assert_eq!(
            summary,
            SqlSummary {
                cities: 2,
                countries: 1,
                users: 3
            }
        );

        // Section order: DDL before city inserts before country inserts
        // before user inserts
        let first_city = script.find("INSERT INTO cities").unwrap();
        let first_country = script.find("INSERT INTO countries").unwrap();
        let first_user = script.find("INSERT INTO users (name").unwrap();
        let last_ddl = script.rfind("CREATE INDEX").unwrap();
        assert!(last_ddl < first_city);
        assert!(first_city < first_country);
        assert!(first_country < first_user);

        // Paris arrived first, so it is city 1; Lyon is city 2
        assert!(script.contains("'A One', 'a.one@example.com', '0700-000000', 1, 1);"));
        assert!(script.contains("'B Two', 'b.two@example.com', '0700-000000', 2, 1);"));
        assert!(script.contains("'C Three', 'c.three@example.com', '0700-000000', 1, 1);"));
    }

    #[test]
    fn test_every_statement_is_terminated() {
        let records = vec![record("A One", "Paris", "France")];
        let mut buffer = Vec::new();
        write_script(&records, &mut buffer).unwrap();
        let script = String::from_utf8(buffer).unwrap();

        for line in script.lines() {
            let trimmed = line.trim_end();
            if trimmed.starts_with("INSERT") {
                assert!(trimmed.ends_with(';'), "unterminated statement: {}", trimmed);
            }
        }
    }
}
