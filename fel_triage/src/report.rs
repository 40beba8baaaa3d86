//! Human-readable report rendering
//!
//! The analysis engine deals in symbolic finding keys; the text for each key
//! lives here, alongside all layout and truncation decisions.

use fel_parser::analysis::{Finding, FindingKey};
use fel_parser::pipeline::TriageResult;
use fel_parser::utils::format_bytes;
use std::fmt::Write;

/// Stack lines shown before eliding the rest
const MAX_STACK_LINES: usize = 10;

/// Resolve the base text for a finding key
pub fn finding_text(key: FindingKey) -> &'static str {
    match key {
        FindingKey::UnidentifiedLines => {
            "Some lines could not be identified; the report may be incomplete"
        }
        FindingKey::MissingDebugSymbols => {
            "The crash frame has no debugging symbols; install debug symbol packages to resolve the stack"
        }
        FindingKey::NativeOutOfMemory => {
            "The JVM failed a native memory allocation; the process ran out of memory"
        }
        FindingKey::HeapExceedsPhysicalMemory => {
            "Configured heap and metaspace exceed physical memory"
        }
        FindingKey::LowPhysicalMemory => "Physical memory was nearly exhausted at crash time",
        FindingKey::SwapDisabled => "Swap is disabled on this host",
        FindingKey::LowSwapFree => "Free swap was nearly exhausted at crash time",
        FindingKey::SigSegv => {
            "SIGSEGV: invalid memory access, typically a native library or JVM defect"
        }
        FindingKey::SigBus => "SIGBUS: misaligned or unmapped memory access",
        FindingKey::SigIll => "SIGILL: illegal instruction, often a CPU/JIT mismatch",
        FindingKey::SigFpe => "SIGFPE: arithmetic fault in native code",
        FindingKey::SmallThreadStack => "Thread stack size is below the recommended minimum",
        FindingKey::HighJavaThreadCount => "Unusually high Java thread count",
        FindingKey::UnknownVendor => "The JVM build could not be attributed to a known vendor",
        FindingKey::NotLatestRelease => "The JVM is not the latest release for its family",
    }
}

/// Render one finding line
fn render_finding(out: &mut String, finding: &Finding) {
    let _ = write!(out, "  [{}] {}", finding.severity, finding_text(finding.key));
    if let Some(detail) = &finding.detail {
        let _ = write!(out, " {}", detail);
    }
    out.push('\n');
}

fn push_fact(out: &mut String, label: &str, value: Option<String>) {
    if let Some(value) = value {
        let _ = writeln!(out, "  {:<18} {}", label, value);
    }
}

/// Render the full text report for a triage result
pub fn render(result: &TriageResult) -> String {
    let log = &result.log;
    let mut out = String::new();

    out.push_str("=== CRASH SUMMARY ===\n");
    push_fact(&mut out, "JVM version:", log.jdk_version.clone());
    push_fact(&mut out, "Vendor:", Some(log.vendor().as_str().to_string()));
    push_fact(&mut out, "OS:", log.os_description.clone());
    push_fact(&mut out, "Architecture:", log.architecture.clone());
    push_fact(&mut out, "Application:", log.java_command.clone());
    push_fact(&mut out, "JVM args:", log.jvm_args.clone());
    push_fact(
        &mut out,
        "Crash time:",
        log.crash_time.map(|t| t.to_string()),
    );
    push_fact(
        &mut out,
        "Elapsed:",
        log.elapsed_seconds.map(|s| format!("{:.1} s", s)),
    );
    push_fact(&mut out, "Signal:", log.signal_name.clone());
    push_fact(
        &mut out,
        "Crash frame:",
        log.problematic_frame
            .as_ref()
            .map(|f| format!("{}  {}", f.marker, f.text)),
    );
    push_fact(&mut out, "Current thread:", log.current_thread.clone());

    out.push_str("\n=== MEMORY ===\n");
    if let (Some(total), Some(free)) = (log.physical_memory_total, log.physical_memory_free) {
        let _ = writeln!(
            &mut out,
            "  Physical:          {} total, {} free ({}% free)",
            format_bytes(total),
            format_bytes(free),
            log.physical_free_percent().unwrap_or(0)
        );
    }
    if let (Some(total), Some(free)) = (log.swap_total, log.swap_free) {
        let _ = writeln!(
            &mut out,
            "  Swap:              {} total, {} free",
            format_bytes(total),
            format_bytes(free)
        );
    }
    if let Some(allocated) = log.heap_allocated {
        let used = log.heap_used.unwrap_or(0);
        let _ = writeln!(
            &mut out,
            "  Heap:              {} allocated, {} used ({}% used)",
            format_bytes(allocated),
            format_bytes(used),
            log.heap_used_percent().unwrap_or(0)
        );
    }
    if let Some(max) = log.heap_max {
        let _ = writeln!(&mut out, "  Heap max:          {}", format_bytes(max));
    }
    if let Some(used) = log.metaspace_used {
        let _ = writeln!(&mut out, "  Metaspace used:    {}", format_bytes(used));
    }

    if !log.stack_lines.is_empty() {
        out.push_str("\n=== STACK ===\n");
        for line in log.stack_lines.iter().take(MAX_STACK_LINES) {
            let _ = writeln!(&mut out, "  {}", line);
        }
        if log.stack_lines.len() > MAX_STACK_LINES {
            let _ = writeln!(
                &mut out,
                "  ... ({} more frames)",
                log.stack_lines.len() - MAX_STACK_LINES
            );
        }
    }

    out.push_str("\n=== FINDINGS ===\n");
    if log.findings.is_empty() {
        out.push_str("  No findings.\n");
    } else {
        for finding in &log.findings {
            render_finding(&mut out, finding);
        }
    }

    let _ = writeln!(
        &mut out,
        "\n{} record(s), {} unidentified line(s), {} finding(s)",
        log.record_count,
        log.unidentified_lines.len() + log.unidentified_dropped,
        log.findings.len()
    );

    out
}

/// Render a machine-readable JSON report
pub fn render_json(result: &TriageResult) -> serde_json::Value {
    let log = &result.log;
    serde_json::json!({
        "jdk_version": log.jdk_version,
        "vendor": log.vendor().as_str(),
        "os": log.os_description,
        "architecture": log.architecture,
        "application": log.java_command,
        "signal": log.signal_name,
        "record_count": log.record_count,
        "unidentified_lines": log.unidentified_lines.len() + log.unidentified_dropped,
        "findings": log.findings.iter().map(|f| {
            serde_json::json!({
                "key": f.key.as_str(),
                "severity": f.severity.as_str(),
                "text": finding_text(f.key),
                "detail": f.detail,
            })
        }).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fel_parser::pipeline::process_source;

    #[test]
    fn test_render_empty_log() {
        let result = process_source("\n").unwrap();
        let text = render(&result);
        assert!(text.contains("No findings."));
        assert!(text.contains("=== FINDINGS ==="));
    }

    #[test]
    fn test_render_contains_finding_text_and_detail() {
        let source = "junk\n";
        let result = process_source(source).unwrap();
        let text = render(&result);
        assert!(text.contains("could not be identified"));
        assert!(text.contains("1 line(s)"));
    }

    #[test]
    fn test_every_key_has_text() {
        // A rendering gap would show up as an empty findings line
        for key in [
            FindingKey::UnidentifiedLines,
            FindingKey::MissingDebugSymbols,
            FindingKey::NativeOutOfMemory,
            FindingKey::HeapExceedsPhysicalMemory,
            FindingKey::LowPhysicalMemory,
            FindingKey::SwapDisabled,
            FindingKey::LowSwapFree,
            FindingKey::SigSegv,
            FindingKey::SigBus,
            FindingKey::SigIll,
            FindingKey::SigFpe,
            FindingKey::SmallThreadStack,
            FindingKey::HighJavaThreadCount,
            FindingKey::UnknownVendor,
            FindingKey::NotLatestRelease,
        ] {
            assert!(!finding_text(key).is_empty());
        }
    }

    #[test]
    fn test_json_report_shape() {
        let result = process_source("junk\n").unwrap();
        let json = render_json(&result);
        assert_eq!(json["unidentified_lines"], 1);
        assert_eq!(json["findings"][0]["key"], "unidentified_lines");
        assert_eq!(json["findings"][0]["severity"], "warning");
    }
}
