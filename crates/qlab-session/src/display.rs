//! Text formatting for the results and state-vector panes.

use qlab_hal::{BasisState, SimulationResult};

/// One row of the measurement table.
#[derive(Debug, Clone, PartialEq)]
pub struct CountRow {
    /// Bitstring.
    pub state: String,
    /// Observed count.
    pub count: u64,
    /// `count / total_shots` as a fraction.
    pub fraction: f64,
}

impl CountRow {
    /// Percentage text, e.g. `78.1%`.
    pub fn percent(&self) -> String {
        format_percent(self.fraction)
    }
}

/// One row of the amplitude table.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeRow {
    /// Ket label, e.g. `|01⟩`.
    pub ket: String,
    /// Amplitude text, e.g. `0.7071 + 0.0000i`.
    pub amplitude: String,
    /// Magnitude to four decimals.
    pub magnitude: String,
    /// Probability as a fraction.
    pub probability: f64,
}

impl AmplitudeRow {
    /// Build a row from a basis-state record.
    pub fn from_basis_state(entry: &BasisState) -> Self {
        Self {
            ket: format!("|{}⟩", entry.state),
            amplitude: format_amplitude(entry.amplitude_real, entry.amplitude_imag),
            magnitude: format!("{:.4}", entry.magnitude),
            probability: entry.probability,
        }
    }

    /// Percentage text.
    pub fn percent(&self) -> String {
        format_percent(self.probability)
    }
}

/// Share of `count` in `total` to one decimal. An empty total reads `0.0%`.
pub fn percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return format_percent(0.0);
    }
    format_percent(count as f64 / total as f64)
}

/// A fraction as a percentage with one decimal.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Complex amplitude as `a + bi` / `a - bi`, both parts to four decimals.
pub fn format_amplitude(real: f64, imag: f64) -> String {
    let sign = if imag.is_sign_negative() && imag != 0.0 { '-' } else { '+' };
    format!("{real:.4} {sign} {:.4}i", imag.abs())
}

/// Number of cells a bar of `fraction` fills in a track of `width` cells.
pub fn bar_cells(fraction: f64, width: usize) -> usize {
    if !fraction.is_finite() || fraction <= 0.0 {
        return 0;
    }
    ((fraction * width as f64).round() as usize).min(width)
}

/// Measurement rows, most frequent outcome first.
///
/// Percentages are taken against the reported `total_shots`.
pub fn count_rows(result: &SimulationResult) -> Vec<CountRow> {
    let total = result.total_shots;
    result
        .sorted_counts()
        .into_iter()
        .map(|(state, count)| CountRow {
            state: state.to_string(),
            count,
            fraction: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            },
        })
        .collect()
}

/// Amplitude rows in the order the backend reported them.
pub fn amplitude_rows(entries: &[BasisState]) -> Vec<AmplitudeRow> {
    entries.iter().map(AmplitudeRow::from_basis_state).collect()
}
