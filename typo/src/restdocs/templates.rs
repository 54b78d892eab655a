//! AsciiDoc table rendering

use std::fmt::Write;

use super::flattener::FlattenedField;

const REQUEST_FIELDS_TITLE: &str = "Request Fields";
const RESPONSE_FIELDS_TITLE: &str = "Response Fields";
const FIELDS_HEADER: &str = "|Path|Type|Description|Optional";
const PARAMETERS_HEADER: &str = "|Name|Description|Required";
const TABLE_DELIMITER: &str = "|===";

/// `Request Fields` table, empty when there are no rows
pub fn request_fields_table(fields: &[FlattenedField]) -> String {
    fields_table(REQUEST_FIELDS_TITLE, fields)
}

/// `Response Fields` table, empty when there are no rows
pub fn response_fields_table(fields: &[FlattenedField]) -> String {
    fields_table(RESPONSE_FIELDS_TITLE, fields)
}

/// Parameter table titled `title`; a row is required when it is not optional
pub fn parameters_table(title: &str, fields: &[FlattenedField]) -> String {
    table(title, PARAMETERS_HEADER, fields, |out, field| {
        let _ = writeln!(out, "|`{}`", field.path);
        let _ = writeln!(out, "|{}", field.description);
        let _ = writeln!(out, "|{}", !field.optional);
    })
}

fn fields_table(title: &str, fields: &[FlattenedField]) -> String {
    table(title, FIELDS_HEADER, fields, |out, field| {
        let _ = writeln!(out, "|`{}`", field.path);
        let _ = writeln!(out, "|`{}`", field.field_type);
        let _ = writeln!(out, "|{}", field.description);
        let _ = writeln!(out, "|{}", field.optional);
    })
}

fn table(
    title: &str,
    header: &str,
    fields: &[FlattenedField],
    row: impl Fn(&mut String, &FlattenedField),
) -> String {
    if fields.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, ".{title}");
    let _ = writeln!(out, "{TABLE_DELIMITER}");
    let _ = writeln!(out, "{header}");
    out.push('\n');
    for field in fields {
        row(&mut out, field);
        out.push('\n');
    }
    let _ = writeln!(out, "{TABLE_DELIMITER}");
    out
}
