// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::CleaningConfig;
use bqc_core::{BeadId, BqcError, Partial};
use std::fmt;
use thiserror::Error;

/// Errors produced while cleaning a bead.
///
/// `Invalid` is a caller/data contract violation and must abort the bead's
/// evaluation loudly. `Rejected` is the ordinary "skip this bead" signal a
/// pipeline catches and records.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CleaningError {
    #[error(transparent)]
    Invalid(#[from] BqcError),
    #[error("{0}")]
    Rejected(Box<BeadRejection>),
}

impl CleaningError {
    pub fn rejection(&self) -> Option<&BeadRejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::Invalid(_) => None,
        }
    }
}

/// One formatted line of a rejection: how many cycles violated which rule.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleViolation {
    /// Machine name of the rule, e.g. `"hfsigma"`.
    pub rule: &'static str,
    /// Human label shown in messages, e.g. `"σ[HF]"`.
    pub label: &'static str,
    pub cycles: usize,
    pub comparison: String,
}

/// A row of the per-track report table.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub bead: BeadId,
    pub rule: &'static str,
    pub cycles: usize,
    pub comparison: String,
}

/// Why a bead was thrown out, with everything needed to explain it without
/// the original configuration object: the rule statistics, the thresholds
/// in force, the bead and the track it came from.
///
/// `partials` is `None` when the bead died on raw population grounds before
/// any per-cycle rule ran.
#[derive(Clone, Debug, PartialEq)]
pub struct BeadRejection {
    pub bead: BeadId,
    pub lineage: String,
    pub ncycles: usize,
    pub partials: Option<Vec<Partial>>,
    pub config: CleaningConfig,
}

impl BeadRejection {
    /// Violated rules, most-violated first, thresholds formatted in.
    pub fn violations(&self) -> Vec<RuleViolation> {
        let Some(partials) = &self.partials else {
            return vec![RuleViolation {
                rule: "population",
                label: rule_label("population"),
                cycles: 0,
                comparison: format!("< {:.0}%", self.config.population.min_population),
            }];
        };

        let mut rows = Vec::new();
        for partial in partials {
            let rule = rule_name(&partial.name);
            for (cycles, comparison) in self.rule_lines(partial) {
                if cycles > 0 {
                    rows.push(RuleViolation {
                        rule,
                        label: rule_label(rule),
                        cycles,
                        comparison,
                    });
                }
            }
        }
        rows.sort_by(|a, b| b.cycles.cmp(&a.cycles).then(a.rule.cmp(b.rule)));
        rows
    }

    /// `(count, comparison)` pairs for one partial; a rule with both bounds
    /// yields up to two lines.
    fn rule_lines(&self, partial: &Partial) -> Vec<(usize, String)> {
        let config = &self.config;
        match partial.name.as_ref() {
            "hfsigma" => vec![
                (
                    partial.min.len(),
                    format!("< {:.4}", config.hf_sigma.min_hf_sigma),
                ),
                (
                    partial.max.len(),
                    format!("> {:.4}", config.hf_sigma.max_hf_sigma),
                ),
            ],
            "population" => vec![(
                partial.min.len(),
                format!("< {:.0}%", config.population.min_population),
            )],
            "extent" => vec![(
                partial.min.len(),
                format!("< {:.2}", config.extent.min_extent),
            )],
            "pingpong" => vec![(
                partial.max.len(),
                format!("> {:.1}", config.ping_pong.max_ping_pong),
            )],
            "phasejump" => {
                let threshold = config
                    .phase_jump
                    .map(|rule| rule.max_phase_jumps)
                    .unwrap_or_default();
                vec![(partial.max.len(), format!("> {threshold:.1}"))]
            }
            "saturation" => {
                // count every cycle past the distance threshold, vetoed or
                // not; the bead-wide veto only controls the max set
                let saturated = partial
                    .values
                    .iter()
                    .filter(|v| v.is_finite() && **v > config.saturation.max_dist_to_zero)
                    .count();
                vec![(
                    saturated,
                    format!("> {:.0}%", config.saturation.max_saturation),
                )]
            }
            _ => vec![(
                partial.min.len() + partial.max.len(),
                "out of bounds".to_string(),
            )],
        }
    }

    /// The rejection as report-table rows.
    pub fn report_rows(&self) -> Vec<ReportRow> {
        self.violations()
            .into_iter()
            .map(|v| ReportRow {
                bead: self.bead,
                rule: v.rule,
                cycles: v.cycles,
                comparison: v.comparison,
            })
            .collect()
    }
}

impl fmt::Display for BeadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: bead {}", self.lineage, self.bead)?;
        if self.partials.is_none() {
            return write!(
                f,
                "has less than {:.0} % valid points",
                self.config.population.min_population
            );
        }
        let violations = self.violations();
        let mut first = true;
        for violation in violations {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(
                f,
                "{} cycles: {} {}",
                violation.cycles, violation.label, violation.comparison
            )?;
        }
        Ok(())
    }
}

/// Interns a partial's rule name; unknown rules group under "unknown".
fn rule_name(name: &str) -> &'static str {
    match name {
        "hfsigma" => "hfsigma",
        "population" => "population",
        "extent" => "extent",
        "pingpong" => "pingpong",
        "phasejump" => "phasejump",
        "saturation" => "saturation",
        _ => "unknown",
    }
}

/// Human label for a rule's machine name, as shown in messages.
fn rule_label(name: &str) -> &'static str {
    match name {
        "hfsigma" => "σ[HF]",
        "population" => "% good",
        "extent" => "Δz",
        "pingpong" => "Σ|dz|",
        "phasejump" => "δ(phase)",
        "saturation" => "non-closing",
        _ => "unknown",
    }
}
