use crate::error::Result;
use crate::model::IdentityShape;
use regex::Regex;

const AIG_PATTERN: &str = r"AIG:\s*([0-9.]+)";

const TIMESTAMP: &str = r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}";

/// Extracts the `AIG:` ratio from a message and the fix marker from a
/// commit's identity line.
#[derive(Debug, Clone)]
pub struct TagExtractor {
    aig: Regex,
    fix: Regex,
}

impl TagExtractor {
    pub fn new(shape: IdentityShape) -> Result<Self> {
        let identity = match shape {
            IdentityShape::Name => format!(r"^[0-9a-f]{{40}} '[^']+' {TIMESTAMP} "),
            IdentityShape::Email => format!(r"^[0-9a-f]{{40}} '[^']+' \S+ {TIMESTAMP} "),
        };
        Ok(Self {
            aig: Regex::new(AIG_PATTERN)?,
            fix: Regex::new(&format!("{identity}(?i:fix)"))?,
        })
    }

    /// First `AIG:` tag followed by an unsigned number. Missing or
    /// unparsable values give 0; negative tags never match. Values above 1
    /// are kept.
    pub fn ai_ratio(&self, message: &str) -> f64 {
        let Some(caps) = self.aig.captures(message) else {
            return 0.0;
        };
        match caps[1].parse::<f64>() {
            Ok(ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
            _ => 0.0,
        }
    }

    /// True when the message head right after the timestamp starts with `fix`.
    pub fn is_fix(&self, identity_line: &str) -> bool {
        self.fix.is_match(identity_line)
    }
}
