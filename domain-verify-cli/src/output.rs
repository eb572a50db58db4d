//! Rendering of the challenge report

use std::fmt::Write as _;
use std::str::FromStr;

use clap::ValueEnum;
use domain_verify_core::ChallengeReportRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// `--filter domain=<name>`; only the `domain` field can be filtered on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainFilter {
    pub domain: String,
}

impl FromStr for DomainFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected `domain=<name>`, got '{s}'"))?;
        if field.trim() != "domain" {
            return Err(format!("unsupported filter field '{}'", field.trim()));
        }
        let value = value.trim().trim_matches(|c| c == '\'' || c == '"');
        if value.is_empty() {
            return Err("domain filter value is empty".to_string());
        }
        Ok(Self {
            domain: value.to_string(),
        })
    }
}

impl DomainFilter {
    pub fn matches(&self, row: &ChallengeReportRow) -> bool {
        row.domain.eq_ignore_ascii_case(&self.domain)
    }
}

const COLUMN_COUNT: usize = 8;

const COLUMNS: [&str; COLUMN_COUNT] = [
    "Domain",
    "Status",
    "HTTP Status",
    "HTTP Key",
    "HTTP Token",
    "DNS Status",
    "DNS Key",
    "DNS Token",
];

fn cells(row: &ChallengeReportRow) -> [&str; COLUMN_COUNT] {
    [
        row.domain.as_str(),
        row.status.as_str(),
        row.http_status.as_str(),
        row.http_key.as_str(),
        row.http_token.as_str(),
        row.dns_status.as_str(),
        row.dns_key.as_str(),
        row.dns_token.as_str(),
    ]
}

/// Plain-text table, columns padded to their widest cell.
pub fn render_table(rows: &[ChallengeReportRow]) -> String {
    let mut widths = COLUMNS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, COLUMNS, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", separator.join("  "));

    for row in rows {
        push_line(&mut out, cells(row), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: [&str; COLUMN_COUNT], widths: &[usize; COLUMN_COUNT]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

pub fn render_json(rows: &[ChallengeReportRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}
