//! The fact model: everything a crash log established, in one aggregate
//!
//! Singleton facts follow most-recent-write-wins during the fold; ordered
//! sequence facts preserve source order; the unidentified-line list is
//! capped. Once the fold completes the model is read-only; analysis only
//! appends findings.

use crate::analysis::Finding;
use crate::records::GlobalFlagLine;
use crate::releases::{Arch, InstallMethod, Os, Vendor};
use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The crash frame named by the "# Problematic frame:" banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrashFrame {
    /// Frame marker: C/V native, j/J/v Java or VM-generated
    pub marker: char,
    /// Frame text, e.g. "[libc.so.6+0x18e6e1]  __memmove_avx_unaligned_erms+0x341"
    pub text: String,
}

impl CrashFrame {
    /// Native frames are C (native library) and V (VM) frames
    pub fn is_native(&self) -> bool {
        matches!(self.marker, 'C' | 'V')
    }

    /// Debug-symbol evidence: a symbol name following the module+offset
    /// bracket, or a source-file reference
    pub fn has_debug_symbols(&self) -> bool {
        static RE_SYMBOL: OnceLock<Regex> = OnceLock::new();
        let re = RE_SYMBOL.get_or_init(|| {
            Regex::new(r"\]\s+\S|\.\w{1,4}:\d+").expect("invalid frame pattern")
        });
        re.is_match(&self.text)
    }
}

/// The aggregate result of parsing one crash log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FatalErrorLog {
    // === SINGLETON FACTS (most recent write wins) ===
    pub os_description: Option<String>,
    pub architecture: Option<String>,
    pub kernel: Option<String>,
    pub physical_memory_total: Option<u64>,
    pub physical_memory_free: Option<u64>,
    pub swap_total: Option<u64>,
    pub swap_free: Option<u64>,
    pub page_size: Option<u64>,

    pub jdk_version: Option<String>,
    pub jre_description: Option<String>,
    pub vm_info: Option<String>,
    pub build_date: Option<NaiveDateTime>,
    pub build_user: Option<String>,

    pub java_command: Option<String>,
    pub jvm_args: Option<String>,
    pub crash_time: Option<NaiveDateTime>,
    pub elapsed_seconds: Option<f64>,
    pub host: Option<String>,
    pub cpu_count: Option<u32>,

    pub heap_max: Option<u64>,
    pub heap_allocated: Option<u64>,
    pub heap_used: Option<u64>,
    pub metaspace_max: Option<u64>,
    pub metaspace_allocated: Option<u64>,
    pub metaspace_used: Option<u64>,

    pub current_thread: Option<String>,
    pub current_thread_stack_size: Option<u64>,
    pub thread_stack_size_flag: Option<u64>,
    pub rlimit_stack: Option<u64>,
    pub stack_free_space: Option<u64>,
    pub java_thread_count: usize,

    pub signal_name: Option<String>,
    pub signal_number: Option<u32>,
    pub signal_code: Option<i32>,
    pub signal_code_name: Option<String>,
    pub problematic_frame: Option<CrashFrame>,
    pub out_of_memory_banner: bool,

    // === ORDERED SEQUENCE FACTS (append-only, source order) ===
    pub header_lines: Vec<String>,
    pub stack_lines: Vec<String>,
    pub vm_events: Vec<String>,
    pub global_flags: Vec<GlobalFlagLine>,
    pub environment_lines: Vec<String>,
    pub thread_lines: Vec<String>,
    pub dynamic_libraries: Vec<String>,

    // === UNIDENTIFIED LINES (capped) ===
    pub unidentified_lines: Vec<String>,
    /// Lines dropped after the cap was reached; counted, never stored
    pub unidentified_dropped: usize,

    // === FINDINGS (populated by the analysis engine) ===
    pub findings: Vec<Finding>,

    /// Total records folded into this model
    pub record_count: usize,
}

impl FatalErrorLog {
    /// Whether any data-dependent analysis rule has something to work with
    pub fn has_usable_data(&self) -> bool {
        !self.header_lines.is_empty()
            || self.vm_info.is_some()
            || self.os_description.is_some()
            || self.current_thread.is_some()
    }

    // === DERIVED PERCENTAGES (computed, zero-guarded) ===

    pub fn heap_used_percent(&self) -> Option<u64> {
        match (self.heap_used, self.heap_allocated) {
            (Some(used), Some(allocated)) => {
                Some(crate::utils::units::percent(used, allocated))
            }
            _ => None,
        }
    }

    pub fn physical_free_percent(&self) -> Option<u64> {
        match (self.physical_memory_free, self.physical_memory_total) {
            (Some(free), Some(total)) => Some(crate::utils::units::percent(free, total)),
            _ => None,
        }
    }

    pub fn swap_free_percent(&self) -> Option<u64> {
        match (self.swap_free, self.swap_total) {
            (Some(free), Some(total)) => Some(crate::utils::units::percent(free, total)),
            _ => None,
        }
    }

    /// Debug-symbol evidence in the crash frame; None when no native frame
    /// was captured
    pub fn has_debug_symbols(&self) -> Option<bool> {
        self.problematic_frame.as_ref().map(|f| f.has_debug_symbols())
    }

    /// Effective per-thread stack size: the ThreadStackSize flag wins over
    /// the process rlimit
    pub fn effective_thread_stack_size(&self) -> Option<u64> {
        self.thread_stack_size_flag
            .or(self.current_thread_stack_size)
            .or(self.rlimit_stack)
    }

    // === RELEASE FAMILY DERIVATION ===

    /// Operating system classification for release family lookup
    pub fn operating_system(&self) -> Os {
        let text = self
            .os_description
            .as_deref()
            .or(self.kernel.as_deref())
            .unwrap_or("");
        let uname_os = self.vm_info.as_deref().unwrap_or("");

        if text.contains("Windows") || uname_os.contains("windows") {
            Os::Windows
        } else if text.contains("Mac") || text.contains("macOS") || uname_os.contains("macos") {
            Os::MacOs
        } else if !text.is_empty() || uname_os.contains("linux") {
            Os::Linux
        } else {
            Os::Unknown
        }
    }

    /// Architecture classification for release family lookup
    pub fn arch(&self) -> Arch {
        match self.architecture.as_deref() {
            Some("x86_64") | Some("amd64") => Arch::X86_64,
            Some("aarch64") | Some("arm64") => Arch::Aarch64,
            Some("ppc64le") => Arch::Ppc64le,
            _ => {
                // vm_info carries "for linux-amd64" when uname was absent
                let vm = self.vm_info.as_deref().unwrap_or("");
                if vm.contains("amd64") || vm.contains("x86_64") {
                    Arch::X86_64
                } else if vm.contains("aarch64") {
                    Arch::Aarch64
                } else {
                    Arch::Unknown
                }
            }
        }
    }

    /// Vendor inference: explicit vendor strings win, then the rpm build
    /// user, then Unknown
    pub fn vendor(&self) -> Vendor {
        let haystack = format!(
            "{} {}",
            self.jre_description.as_deref().unwrap_or(""),
            self.vm_info.as_deref().unwrap_or("")
        );

        if haystack.contains("Temurin") || haystack.contains("Adoptium") {
            Vendor::Temurin
        } else if haystack.contains("AdoptOpenJDK") {
            Vendor::AdoptOpenJdk
        } else if haystack.contains("Zulu") {
            Vendor::Azul
        } else if haystack.contains("Corretto") {
            Vendor::Amazon
        } else if haystack.contains("Microsoft") {
            Vendor::Microsoft
        } else if haystack.contains("Java(TM)") || haystack.contains("HotSpot(TM)") {
            Vendor::Oracle
        } else if haystack.contains("Red Hat")
            || self.build_user.as_deref() == Some("mockbuild")
        {
            Vendor::RedHat
        } else {
            Vendor::Unknown
        }
    }

    /// Install method inference from the mapped JVM library path
    pub fn install_method(&self) -> InstallMethod {
        let jvm_line = self
            .dynamic_libraries
            .iter()
            .find(|l| l.contains("libjvm.so") || l.contains("jvm.dll"));

        match jvm_line {
            Some(line) if line.contains("/usr/lib/jvm/") => InstallMethod::Rpm,
            Some(line) if line.contains("jvm.dll") => InstallMethod::Installer,
            Some(_) => InstallMethod::Tarball,
            None => match self.operating_system() {
                Os::Windows => InstallMethod::Installer,
                Os::Linux | Os::MacOs => InstallMethod::Tarball,
                Os::Unknown => InstallMethod::Unknown,
            },
        }
    }
}
