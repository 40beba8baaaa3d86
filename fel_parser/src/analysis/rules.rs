//! The diagnostic rules
//!
//! Each rule is an independent, side-effect-free predicate over the fact
//! model. A rule whose required facts are absent returns None; it never
//! raises an error. Only the version-currency rule can surface a database
//! contract violation, which is fatal configuration breakage, not an input
//! property.

use super::findings::{Finding, FindingKey};
use crate::config::constants::compile_time::analysis::{
    JAVA_THREAD_WARNING_THRESHOLD, LOW_PHYSICAL_MEMORY_PERCENT, LOW_SWAP_PERCENT,
    THREAD_STACK_SIZE_FLOOR,
};
use crate::model::FatalErrorLog;
use crate::releases::{DatabaseError, ReleaseDatabase, Vendor};
use crate::utils::day_diff;

/// Unidentified lines were collected: the report is incomplete.
pub fn rule_unidentified_lines(model: &FatalErrorLog) -> Option<Finding> {
    let total = model.unidentified_lines.len() + model.unidentified_dropped;
    if total == 0 {
        return None;
    }
    Some(Finding::with_detail(
        FindingKey::UnidentifiedLines,
        format!("{} line(s)", total),
    ))
}

/// Native crash frame without debug-symbol evidence.
pub fn rule_missing_debug_symbols(model: &FatalErrorLog) -> Option<Finding> {
    let frame = model.problematic_frame.as_ref()?;
    if frame.is_native() && !frame.has_debug_symbols() {
        Some(Finding::new(FindingKey::MissingDebugSymbols))
    } else {
        None
    }
}

/// The VM reported a native allocation failure in the banner.
pub fn rule_native_out_of_memory(model: &FatalErrorLog) -> Option<Finding> {
    if model.out_of_memory_banner {
        Some(Finding::new(FindingKey::NativeOutOfMemory))
    } else {
        None
    }
}

/// Configured heap plus metaspace cannot fit in physical memory.
pub fn rule_heap_exceeds_physical(model: &FatalErrorLog) -> Option<Finding> {
    let physical = model.physical_memory_total?;
    let heap_max = model.heap_max?;
    let committed = heap_max.saturating_add(model.metaspace_max.unwrap_or(0));

    if committed > physical {
        Some(Finding::with_detail(
            FindingKey::HeapExceedsPhysicalMemory,
            format!(
                "{} configured vs {} physical",
                crate::utils::format_bytes(committed),
                crate::utils::format_bytes(physical)
            ),
        ))
    } else {
        None
    }
}

/// Free physical memory nearly exhausted at crash time.
pub fn rule_low_physical_memory(model: &FatalErrorLog) -> Option<Finding> {
    let percent = model.physical_free_percent()?;
    if percent < LOW_PHYSICAL_MEMORY_PERCENT {
        Some(Finding::with_detail(
            FindingKey::LowPhysicalMemory,
            format!("{}% free", percent),
        ))
    } else {
        None
    }
}

/// Swap configuration problems: disabled entirely, or nearly exhausted.
pub fn rule_swap(model: &FatalErrorLog) -> Option<Finding> {
    let total = model.swap_total?;
    if total == 0 {
        return Some(Finding::new(FindingKey::SwapDisabled));
    }

    let percent = model.swap_free_percent()?;
    if percent < LOW_SWAP_PERCENT {
        Some(Finding::with_detail(
            FindingKey::LowSwapFree,
            format!("{}% free", percent),
        ))
    } else {
        None
    }
}

/// Signal explanation for the common crash signals.
pub fn rule_signal(model: &FatalErrorLog) -> Option<Finding> {
    let key = match model.signal_name.as_deref()? {
        "SIGSEGV" | "EXCEPTION_ACCESS_VIOLATION" => FindingKey::SigSegv,
        "SIGBUS" => FindingKey::SigBus,
        "SIGILL" | "EXCEPTION_ILLEGAL_INSTRUCTION" => FindingKey::SigIll,
        "SIGFPE" | "EXCEPTION_INT_DIVIDE_BY_ZERO" => FindingKey::SigFpe,
        _ => return None,
    };
    Some(Finding::new(key))
}

/// Per-thread stack size below the floor a server JVM needs.
pub fn rule_small_thread_stack(model: &FatalErrorLog) -> Option<Finding> {
    let size = model.effective_thread_stack_size()?;
    if size < THREAD_STACK_SIZE_FLOOR {
        Some(Finding::with_detail(
            FindingKey::SmallThreadStack,
            crate::utils::format_bytes(size),
        ))
    } else {
        None
    }
}

/// Java thread count high enough to suggest thread pressure.
pub fn rule_high_thread_count(model: &FatalErrorLog) -> Option<Finding> {
    if model.java_thread_count > JAVA_THREAD_WARNING_THRESHOLD {
        Some(Finding::with_detail(
            FindingKey::HighJavaThreadCount,
            format!("{} threads", model.java_thread_count),
        ))
    } else {
        None
    }
}

/// The JVM build identity could not be attributed to a known vendor.
pub fn rule_unknown_vendor(model: &FatalErrorLog) -> Option<Finding> {
    // Only meaningful when there is a build identity to attribute
    if model.vm_info.is_none() && model.jre_description.is_none() {
        return None;
    }
    if model.vendor() == Vendor::Unknown {
        Some(Finding::new(FindingKey::UnknownVendor))
    } else {
        None
    }
}

/// Version currency against the release database.
///
/// Resolves the crash's release family; when the crash's version key is
/// unknown to that family, currency cannot be determined and no finding is
/// emitted. Otherwise the crash build is compared to the family's LATEST
/// entry: a structurally different version string is "not latest", and so is
/// a matching version string whose build date differs (a rebuild of the same
/// release string). The "(newer by N versions and M days)" elaboration is
/// appended only when both deltas are strictly positive.
pub fn rule_version_currency(
    model: &FatalErrorLog,
    db: &ReleaseDatabase,
) -> Result<Option<Finding>, DatabaseError> {
    let version_key = match model.jdk_version.as_deref() {
        Some(v) => v,
        None => return Ok(None),
    };

    let family = match db.family(
        model.vendor(),
        model.operating_system(),
        model.arch(),
        model.install_method(),
    ) {
        Some(f) => f,
        None => return Ok(None),
    };

    let entry = match family.get(version_key) {
        Some(e) => e,
        None => return Ok(None),
    };

    // A resolvable family without LATEST is a database defect.
    let latest = family.latest()?;

    if entry.version != latest.version {
        let version_delta = i64::from(latest.sequence) - i64::from(entry.sequence);
        let days = day_diff(entry.build_date, latest.build_date);

        let finding = if version_delta > 0 && days > 0 {
            Finding::with_detail(
                FindingKey::NotLatestRelease,
                format!("(newer by {} versions and {} days)", version_delta, days),
            )
        } else {
            Finding::new(FindingKey::NotLatestRelease)
        };
        return Ok(Some(finding));
    }

    // Same version string: a differing build date means a rebuild of the
    // same release string exists.
    let crash_build_date = model.build_date.map(|d| d.date()).unwrap_or(entry.build_date);
    if crash_build_date != latest.build_date {
        return Ok(Some(Finding::new(FindingKey::NotLatestRelease)));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CrashFrame;
    use crate::releases;

    #[test]
    fn test_unidentified_rule_counts_dropped_lines() {
        let model = FatalErrorLog {
            unidentified_lines: vec!["x".to_string(); 3],
            unidentified_dropped: 2,
            ..Default::default()
        };
        let finding = rule_unidentified_lines(&model).unwrap();
        assert_eq!(finding.detail.as_deref(), Some("5 line(s)"));

        assert!(rule_unidentified_lines(&FatalErrorLog::default()).is_none());
    }

    #[test]
    fn test_debug_symbol_rule() {
        let mut model = FatalErrorLog {
            problematic_frame: Some(CrashFrame {
                marker: 'C',
                text: "[libc.so.6+0x18e6e1]".to_string(),
            }),
            ..Default::default()
        };
        assert!(rule_missing_debug_symbols(&model).is_some());

        model.problematic_frame = Some(CrashFrame {
            marker: 'C',
            text: "[libc.so.6+0x18e6e1]  __memmove_avx_unaligned_erms+0x341".to_string(),
        });
        assert!(rule_missing_debug_symbols(&model).is_none());

        // Java frames carry their own symbols
        model.problematic_frame = Some(CrashFrame {
            marker: 'j',
            text: "java.lang.Thread.run()V+11".to_string(),
        });
        assert!(rule_missing_debug_symbols(&model).is_none());

        model.problematic_frame = None;
        assert!(rule_missing_debug_symbols(&model).is_none());
    }

    #[test]
    fn test_heap_exceeds_physical_rule() {
        let model = FatalErrorLog {
            physical_memory_total: Some(2 * 1024 * 1024 * 1024),
            heap_max: Some(4 * 1024 * 1024 * 1024),
            ..Default::default()
        };
        assert!(rule_heap_exceeds_physical(&model).is_some());

        let model = FatalErrorLog {
            physical_memory_total: Some(16 * 1024 * 1024 * 1024),
            heap_max: Some(4 * 1024 * 1024 * 1024),
            metaspace_max: Some(1024 * 1024 * 1024),
            ..Default::default()
        };
        assert!(rule_heap_exceeds_physical(&model).is_none());

        // Absent facts: silent skip
        assert!(rule_heap_exceeds_physical(&FatalErrorLog::default()).is_none());
    }

    #[test]
    fn test_swap_rules() {
        let disabled = FatalErrorLog {
            swap_total: Some(0),
            swap_free: Some(0),
            ..Default::default()
        };
        assert_eq!(
            rule_swap(&disabled).unwrap().key,
            FindingKey::SwapDisabled
        );

        let low = FatalErrorLog {
            swap_total: Some(8 * 1024 * 1024 * 1024),
            swap_free: Some(100 * 1024 * 1024),
            ..Default::default()
        };
        assert_eq!(rule_swap(&low).unwrap().key, FindingKey::LowSwapFree);

        let healthy = FatalErrorLog {
            swap_total: Some(8 * 1024 * 1024 * 1024),
            swap_free: Some(8 * 1024 * 1024 * 1024),
            ..Default::default()
        };
        assert!(rule_swap(&healthy).is_none());
    }

    #[test]
    fn test_signal_rule() {
        let model = FatalErrorLog {
            signal_name: Some("SIGSEGV".to_string()),
            ..Default::default()
        };
        assert_eq!(rule_signal(&model).unwrap().key, FindingKey::SigSegv);

        let model = FatalErrorLog {
            signal_name: Some("SIGQUIT".to_string()),
            ..Default::default()
        };
        assert!(rule_signal(&model).is_none());
    }

    #[test]
    fn test_small_thread_stack_rule() {
        let model = FatalErrorLog {
            thread_stack_size_flag: Some(64 * 1024),
            ..Default::default()
        };
        assert!(rule_small_thread_stack(&model).is_some());

        let model = FatalErrorLog {
            thread_stack_size_flag: Some(1024 * 1024),
            ..Default::default()
        };
        assert!(rule_small_thread_stack(&model).is_none());
    }

    #[test]
    fn test_version_currency_not_latest_with_elaboration() {
        let model = FatalErrorLog {
            os_description: Some("Red Hat Enterprise Linux release 8.6 (Ootpa)".to_string()),
            architecture: Some("x86_64".to_string()),
            build_user: Some("mockbuild".to_string()),
            jdk_version: Some("21.0.0+35-LTS".to_string()),
            dynamic_libraries: vec![
                "7f0 r-xp /usr/lib/jvm/java-21-openjdk/lib/server/libjvm.so".to_string(),
            ],
            ..Default::default()
        };

        let finding = rule_version_currency(&model, releases::global())
            .unwrap()
            .unwrap();
        assert_eq!(finding.key, FindingKey::NotLatestRelease);
        // seq 3 - seq 1 = 2 versions; 2023-09-19 -> 2023-10-17 = 28 days
        assert_eq!(
            finding.detail.as_deref(),
            Some("(newer by 2 versions and 28 days)")
        );
    }

    #[test]
    fn test_version_currency_unknown_key_is_silent() {
        let model = FatalErrorLog {
            os_description: Some("Red Hat Enterprise Linux release 8.6 (Ootpa)".to_string()),
            architecture: Some("x86_64".to_string()),
            build_user: Some("mockbuild".to_string()),
            jdk_version: Some("99.0.0+1".to_string()),
            dynamic_libraries: vec![
                "7f0 r-xp /usr/lib/jvm/java-99-openjdk/lib/server/libjvm.so".to_string(),
            ],
            ..Default::default()
        };
        assert!(rule_version_currency(&model, releases::global())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_version_currency_latest_is_silent() {
        let model = FatalErrorLog {
            os_description: Some("Red Hat Enterprise Linux release 8.6 (Ootpa)".to_string()),
            architecture: Some("x86_64".to_string()),
            build_user: Some("mockbuild".to_string()),
            jdk_version: Some("21.0.1+12-LTS".to_string()),
            build_date: chrono::NaiveDate::from_ymd_opt(2023, 10, 17)
                .unwrap()
                .and_hms_opt(0, 0, 0),
            dynamic_libraries: vec![
                "7f0 r-xp /usr/lib/jvm/java-21-openjdk/lib/server/libjvm.so".to_string(),
            ],
            ..Default::default()
        };
        assert!(rule_version_currency(&model, releases::global())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_version_currency_same_version_different_date() {
        // A rebuild of the same release string is reported without the
        // elaboration (the sequence delta is zero).
        let model = FatalErrorLog {
            os_description: Some("Red Hat Enterprise Linux release 8.6 (Ootpa)".to_string()),
            architecture: Some("x86_64".to_string()),
            build_user: Some("mockbuild".to_string()),
            jdk_version: Some("21.0.1+12-LTS".to_string()),
            build_date: chrono::NaiveDate::from_ymd_opt(2023, 11, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0),
            dynamic_libraries: vec![
                "7f0 r-xp /usr/lib/jvm/java-21-openjdk/lib/server/libjvm.so".to_string(),
            ],
            ..Default::default()
        };
        let finding = rule_version_currency(&model, releases::global())
            .unwrap()
            .unwrap();
        assert_eq!(finding.key, FindingKey::NotLatestRelease);
        assert!(finding.detail.is_none());
    }

    #[test]
    fn test_version_currency_missing_facts_is_silent() {
        assert!(
            rule_version_currency(&FatalErrorLog::default(), releases::global())
                .unwrap()
                .is_none()
        );
    }
}
