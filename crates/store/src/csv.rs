#![forbid(unsafe_code)]

// Minimal RFC-4180-style codec for the fixed seven-column table. Quoting
// matters because `reported_by` is free text and may carry commas, quotes
// or line breaks.

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CsvRecord {
    /// 1-based line number where the record starts.
    pub line: usize,
    pub fields: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CsvError {
    pub line: usize,
    pub message: &'static str,
}

pub(crate) fn split_records(text: &str) -> Result<Vec<CsvRecord>, CsvError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Set once a quoted field closed; only a separator may follow.
    let mut quote_closed = false;
    // True if any field of the current record was quoted (a lone `""`
    // record is content, not a blank line).
    let mut saw_quote = false;
    let mut line = 1usize;
    let mut record_line = 1usize;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                        quote_closed = true;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                if !field.is_empty() || quote_closed {
                    return Err(CsvError {
                        line,
                        message: "unexpected quote inside unquoted field",
                    });
                }
                in_quotes = true;
                saw_quote = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                quote_closed = false;
            }
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    return Err(CsvError {
                        line,
                        message: "stray carriage return",
                    });
                }
                // Let the '\n' branch terminate the record.
            }
            '\n' => {
                line += 1;
                if fields.is_empty() && field.is_empty() && !saw_quote {
                    // Only the writer's single trailing newline is
                    // expected; a blank line is malformed data.
                    return Err(CsvError {
                        line: line - 1,
                        message: "blank line",
                    });
                }
                fields.push(std::mem::take(&mut field));
                records.push(CsvRecord {
                    line: record_line,
                    fields: std::mem::take(&mut fields),
                });
                quote_closed = false;
                saw_quote = false;
                record_line = line;
            }
            _ => {
                if quote_closed {
                    return Err(CsvError {
                        line,
                        message: "text after closing quote",
                    });
                }
                field.push(ch);
            }
        }
    }

    if in_quotes {
        return Err(CsvError {
            line: record_line,
            message: "unterminated quoted field",
        });
    }
    if !fields.is_empty() || !field.is_empty() || saw_quote {
        fields.push(field);
        records.push(CsvRecord {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}

pub(crate) fn push_field(out: &mut String, value: &str) {
    if value.contains(['"', ',', '\n', '\r']) {
        out.push('"');
        for ch in value.chars() {
            if ch == '"' {
                out.push('"');
            }
            out.push(ch);
        }
        out.push('"');
    } else {
        out.push_str(value);
    }
}
