//! Metric name parsing.
use checks_base::MetricType;
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::metrics::{METRICS, METRIC_PREFIX};

/// A raw stat name that matches no known Envoy metric.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown metric `{name}`")]
pub struct UnknownMetric {
    /// The raw stat name, as read from the stats endpoint.
    pub name: String,
}

/// The result of parsing a raw Envoy stat name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedMetric {
    /// Canonical metric name, e.g. `envoy.cluster.upstream_cx_total`.
    pub name: String,
    /// Tags extracted from the variable segments of the stat name, in pattern order.
    pub tags: Vec<String>,
    /// How the value is submitted.
    pub kind: MetricType,
}

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Tag(&'static str),
}

#[derive(Debug)]
struct Pattern {
    segments: Vec<Segment>,
    name: String,
    kind: MetricType,
}

impl Pattern {
    fn compile(pattern: &'static str, kind: MetricType) -> Pattern {
        let segments = pattern
            .split('.')
            .map(|part| match part.strip_prefix('{').and_then(|part| part.strip_suffix('}')) {
                Some(tag) => Segment::Tag(tag),
                None => Segment::Literal(part),
            })
            .collect::<Vec<_>>();

        let literals = segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Literal(literal) => Some(*literal),
                Segment::Tag(_) => None,
            })
            .collect::<Vec<_>>();
        let name = format!("{METRIC_PREFIX}{}", literals.join("."));

        Pattern { segments, name, kind }
    }

    fn parse(&self, parts: &[&str]) -> Option<ParsedMetric> {
        let mut captures = Vec::new();
        if !match_segments(&self.segments, parts, 0, &mut captures) {
            return None;
        }

        let tags = captures
            .iter()
            .map(|capture| format!("{}:{}", capture.tag, parts[capture.start..capture.end].join(".")))
            .collect();

        Some(ParsedMetric { name: self.name.clone(), tags, kind: self.kind })
    }
}

/// A tag value spanning `parts[start..end]`.
#[derive(Debug)]
struct Capture {
    tag: &'static str,
    start: usize,
    end: usize,
}

// A tag segment consumes one or more parts, preferring the shortest capture that lets the rest of the pattern
// match. When a literal follows the tag, only captures ending right before that literal are tried.
fn match_segments(segments: &[Segment], parts: &[&str], pos: usize, captures: &mut Vec<Capture>) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return pos == parts.len();
    };

    match segment {
        Segment::Literal(literal) => {
            parts.get(pos).is_some_and(|part| part == literal) && match_segments(rest, parts, pos + 1, captures)
        }
        Segment::Tag(tag) => {
            if parts.len() < pos + rest.len() + 1 {
                return false;
            }

            for end in pos + 1..=parts.len() - rest.len() {
                if let Some(Segment::Literal(next)) = rest.first() {
                    if parts[end] != *next {
                        continue;
                    }
                }
                if end == pos + 1 && parts[pos].is_empty() {
                    continue;
                }

                captures.push(Capture { tag: *tag, start: pos, end });
                if match_segments(rest, parts, end, captures) {
                    return true;
                }
                captures.pop();
            }

            false
        }
    }
}

static PATTERNS: Lazy<Vec<Pattern>> =
    Lazy::new(|| METRICS.iter().map(|(pattern, kind)| Pattern::compile(pattern, *kind)).collect());

/// Parses a raw Envoy stat name into its canonical metric name, tags and metric type.
///
/// Known stat patterns are tried in order and the first match wins.
///
/// # Errors
///
/// If `raw` matches no known pattern, [`UnknownMetric`] is returned.
pub fn parse_metric(raw: &str) -> Result<ParsedMetric, UnknownMetric> {
    let parts = raw.split('.').collect::<Vec<_>>();
    PATTERNS.iter().find_map(|pattern| pattern.parse(&parts)).ok_or_else(|| UnknownMetric { name: raw.to_owned() })
}
