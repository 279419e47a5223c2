//! Run thresholds
//!
//! Pass/fail conditions over the aggregate metrics the load engine produces.
//! Conditions are parsed up front (a bad condition string is a programming
//! error and fails the run at startup) and evaluated once at run end against
//! the engine's own response-time histogram and success/failure counters.
//! A violated threshold marks the whole run failed.

use std::collections::BTreeMap;

use anyhow::bail;
use goose::metrics::GooseMetrics;

/// Aggregate metric a threshold applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Request round-trip time in milliseconds
    RequestDuration,
    /// Share of requests recorded as failed (transport errors, bad status,
    /// failed checks)
    RequestFailed,
}

impl Metric {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "request_duration" => Some(Self::RequestDuration),
            "request_failed" => Some(Self::RequestFailed),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::RequestDuration => "request_duration",
            Self::RequestFailed => "request_failed",
        }
    }
}

/// Condition parsed from a threshold string such as `p(95)<500` or `rate<0.1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// The given percentile of the metric stays under the bound (ms)
    Percentile { quantile: f64, below_ms: f64 },
    /// The metric's rate stays under the bound (0.0 - 1.0)
    Rate { below: f64 },
}

/// Parses a single condition string. Returns `None` when the string does not
/// match either supported form.
pub fn parse_condition(condition: &str) -> Option<Condition> {
    let condition = condition.trim();

    if let Some(rest) = condition.strip_prefix("p(") {
        let (percentile, bound) = rest.split_once(")<")?;
        let percentile: f64 = percentile.trim().parse().ok()?;
        if !(0.0..=100.0).contains(&percentile) {
            return None;
        }
        let below_ms: f64 = bound.trim().parse().ok()?;
        return Some(Condition::Percentile {
            quantile: percentile / 100.0,
            below_ms,
        });
    }

    if let Some(bound) = condition.strip_prefix("rate<") {
        let below: f64 = bound.trim().parse().ok()?;
        return Some(Condition::Rate { below });
    }

    None
}

/// One metric/condition pair
#[derive(Debug, Clone)]
pub struct Threshold {
    metric: Metric,
    condition: Condition,
    raw: String,
}

impl Threshold {
    /// Evaluates this threshold against a flattened metric sample
    pub fn check(&self, sample: &MetricSample) -> Outcome {
        let (actual, passed) = match (self.metric, self.condition) {
            (Metric::RequestDuration, Condition::Percentile { quantile, below_ms }) => {
                let actual = sample.duration_at_quantile(quantile);
                (actual, actual < below_ms)
            }
            (Metric::RequestFailed, Condition::Rate { below }) => {
                let actual = sample.fail_rate();
                (actual, actual < below)
            }
            // require() rejects the remaining combinations
            _ => (f64::NAN, false),
        };

        Outcome {
            metric: self.metric.name(),
            condition: self.raw.clone(),
            actual,
            passed,
        }
    }
}

/// Result of evaluating one threshold
#[derive(Debug, Clone)]
pub struct Outcome {
    pub metric: &'static str,
    pub condition: String,
    pub actual: f64,
    pub passed: bool,
}

/// The full threshold mapping for one run
#[derive(Debug, Clone, Default)]
pub struct ThresholdSet {
    thresholds: Vec<Threshold>,
}

impl ThresholdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a threshold, e.g. `require("request_duration", "p(95)<500")`.
    /// Rejects unknown metrics, unparseable conditions, and metric/condition
    /// combinations that make no sense (a rate bound on a duration).
    pub fn require(mut self, metric: &str, condition: &str) -> anyhow::Result<Self> {
        let Some(parsed_metric) = Metric::parse(metric) else {
            bail!("unknown threshold metric: {}", metric);
        };
        let Some(parsed_condition) = parse_condition(condition) else {
            bail!("unparseable threshold condition: {}", condition);
        };

        let valid = matches!(
            (parsed_metric, parsed_condition),
            (Metric::RequestDuration, Condition::Percentile { .. })
                | (Metric::RequestFailed, Condition::Rate { .. })
        );
        if !valid {
            bail!("condition {} does not apply to metric {}", condition, metric);
        }

        self.thresholds.push(Threshold {
            metric: parsed_metric,
            condition: parsed_condition,
            raw: condition.to_string(),
        });
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Evaluates every threshold against the engine's aggregated run metrics
    pub fn evaluate(&self, metrics: &GooseMetrics) -> Vec<Outcome> {
        let sample = MetricSample::from_goose(metrics);
        self.check_sample(&sample)
    }

    pub fn check_sample(&self, sample: &MetricSample) -> Vec<Outcome> {
        self.thresholds
            .iter()
            .map(|threshold| threshold.check(sample))
            .collect()
    }
}

/// Flattened view of the engine's per-path request aggregates, merged across
/// all paths. The response-time histogram is the engine's own (bucketed)
/// data; this type only reads values out of it.
#[derive(Debug, Clone, Default)]
pub struct MetricSample {
    pub times: BTreeMap<usize, usize>,
    pub total: usize,
    pub max: usize,
    pub success: usize,
    pub fail: usize,
}

impl MetricSample {
    pub fn from_goose(metrics: &GooseMetrics) -> Self {
        let mut sample = Self::default();

        for aggregate in metrics.requests.values() {
            for (&time, &count) in &aggregate.raw_data.times {
                *sample.times.entry(time).or_insert(0) += count;
            }
            sample.total += aggregate.raw_data.counter;
            sample.max = sample.max.max(aggregate.raw_data.maximum_time);
            sample.success += aggregate.success_count;
            sample.fail += aggregate.fail_count;
        }

        sample
    }

    /// Response time at the given quantile of the histogram, in milliseconds
    pub fn duration_at_quantile(&self, quantile: f64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        let rank = ((self.total as f64) * quantile).ceil().max(1.0) as usize;
        let mut seen = 0;
        for (&time, &count) in &self.times {
            seen += count;
            if seen >= rank {
                return time as f64;
            }
        }

        self.max as f64
    }

    /// Failed requests as a share of all requests; 0.0 for an empty run
    pub fn fail_rate(&self) -> f64 {
        let total = self.success + self.fail;
        if total == 0 {
            return 0.0;
        }
        self.fail as f64 / total as f64
    }
}

/// Logs every outcome and returns an error if any threshold was violated,
/// so `main` exits non-zero on a failed run.
pub fn report(outcomes: &[Outcome]) -> anyhow::Result<()> {
    let mut violated = 0;

    for outcome in outcomes {
        if outcome.passed {
            tracing::info!(
                "threshold passed: {} {} (actual {:.2})",
                outcome.metric,
                outcome.condition,
                outcome.actual
            );
        } else {
            violated += 1;
            tracing::error!(
                "threshold VIOLATED: {} {} (actual {:.2})",
                outcome.metric,
                outcome.condition,
                outcome.actual
            );
        }
    }

    if violated > 0 {
        bail!("{} threshold(s) violated", violated);
    }
    Ok(())
}
