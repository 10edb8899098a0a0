use pbs::PredictionResult;
use std::io::Write;

/// Line printed once before the first prediction of a sweep.
pub fn write_header(
    out: &mut impl Write,
    time_since_write_ms: f64,
    versions_stale: u32,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{time_since_write_ms}ms after a given write, with maximum version staleness of k={versions_stale}"
    )
}

pub fn write_text(out: &mut impl Write, result: &PredictionResult) -> std::io::Result<()> {
    writeln!(out, "N={}, R={}, W={}", result.n(), result.r(), result.w())?;
    writeln!(
        out,
        "Probability of consistent reads: {:.6}",
        result.consistency_probability()
    )?;
    writeln!(
        out,
        "Average read latency: {:.6}ms ({:.3}th %ile {:.3}ms)",
        result.average_read_latency(),
        result.percentile_read_latency_percentile() * 100.0,
        result.percentile_read_latency()
    )?;
    writeln!(
        out,
        "Average write latency: {:.6}ms ({:.3}th %ile {:.3}ms)",
        result.average_write_latency(),
        result.percentile_write_latency_percentile() * 100.0,
        result.percentile_write_latency()
    )?;
    writeln!(out)
}

pub fn write_json(out: &mut impl Write, result: &PredictionResult) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, result)?;
    writeln!(out)?;

    Ok(())
}
