use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("invalid sequence variant {input:?}: {reason}")]
    InvalidSeqvar { input: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown genome release {0:?} (expected grch37 or grch38)")]
pub struct ParseReleaseError(pub String);

/// Reference genome a query is expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenomeRelease {
    #[default]
    Grch37,
    Grch38,
}

impl GenomeRelease {
    /// Identifier used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            GenomeRelease::Grch37 => "grch37",
            GenomeRelease::Grch38 => "grch38",
        }
    }
}

impl fmt::Display for GenomeRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenomeRelease {
    type Err = ParseReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grch37" | "hg19" => Ok(GenomeRelease::Grch37),
            "grch38" | "hg38" => Ok(GenomeRelease::Grch38),
            _ => Err(ParseReleaseError(s.to_string())),
        }
    }
}

/// Settings the backend hands to the frontend (analytics wiring).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendSettings {
    pub matomo_host: String,
    pub matomo_site_id: String,
}

/// Gene annotation as returned by the gene-search backend.
///
/// The backend owns the shape, so the record is kept as a JSON object and
/// serialized back verbatim. Anything that is not an object is rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneRecord(Map<String, Value>);

impl GeneRecord {
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        expect_object(value).map(Self)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for GeneRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Per-criterion ACMG rating from an InterVar-compatible endpoint.
///
/// Criteria (`PVS1`, `PS1`, ..., `BP7`) map to integers; any further fields
/// the endpoint returns are kept untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcmgRating(Map<String, Value>);

impl AcmgRating {
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        expect_object(value).map(Self)
    }

    /// Integer value of a single criterion, if present.
    pub fn criterion(&self, name: &str) -> Option<i64> {
        self.0.get(name).and_then(Value::as_i64)
    }

    /// Names of the criteria rated as met (non-zero).
    pub fn met_criteria(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(key, value)| is_acmg_criterion(key) && value.as_i64().is_some_and(|v| v != 0))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn is_acmg_criterion(key: &str) -> bool {
    const PREFIXES: [&str; 7] = ["PVS", "PS", "PM", "PP", "BA", "BS", "BP"];
    PREFIXES.iter().any(|prefix| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
    })
}

fn expect_object(value: Value) -> Result<Map<String, Value>, RecordError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(RecordError::NotAnObject("null")),
        Value::Bool(_) => Err(RecordError::NotAnObject("boolean")),
        Value::Number(_) => Err(RecordError::NotAnObject("number")),
        Value::String(_) => Err(RecordError::NotAnObject("string")),
        Value::Array(_) => Err(RecordError::NotAnObject("array")),
    }
}

/// A sequence variant addressed by genomic coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeqvarQuery {
    pub release: GenomeRelease,
    pub chromosome: String,
    pub position: u64,
    pub reference: String,
    pub alternative: String,
}

impl SeqvarQuery {
    /// Parses `CHROM:POS:REF:ALT`; a leading `chr` is dropped.
    pub fn parse(release: GenomeRelease, input: &str) -> Result<Self, RecordError> {
        let invalid = |reason: &'static str| RecordError::InvalidSeqvar {
            input: input.to_string(),
            reason,
        };

        let parts: Vec<&str> = input.trim().split(':').collect();
        let [chromosome, position, reference, alternative] = parts.as_slice() else {
            return Err(invalid("expected CHROM:POS:REF:ALT"));
        };

        let chromosome = strip_chr_prefix(chromosome);
        if chromosome.is_empty() {
            return Err(invalid("empty chromosome"));
        }
        let position: u64 = position
            .parse()
            .map_err(|_| invalid("position is not a positive integer"))?;
        if position == 0 {
            return Err(invalid("positions are 1-based"));
        }
        if !is_allele(reference) || !is_allele(alternative) {
            return Err(invalid("alleles must be non-empty nucleotide strings"));
        }

        Ok(Self {
            release,
            chromosome: chromosome.to_string(),
            position,
            reference: reference.to_ascii_uppercase(),
            alternative: alternative.to_ascii_uppercase(),
        })
    }

    /// Query parameters understood by the ACMG endpoint.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("release", self.release.as_str().to_string()),
            ("chromosome", self.chromosome.clone()),
            ("position", self.position.to_string()),
            ("reference", self.reference.clone()),
            ("alternative", self.alternative.clone()),
        ]
    }
}

impl fmt::Display for SeqvarQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}-{}",
            self.release, self.chromosome, self.position, self.reference, self.alternative
        )
    }
}

fn strip_chr_prefix(chromosome: &str) -> &str {
    match chromosome.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &chromosome[3..],
        _ => chromosome,
    }
}

fn is_allele(allele: &str) -> bool {
    !allele.is_empty()
        && allele
            .chars()
            .all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T' | 'N'))
}
