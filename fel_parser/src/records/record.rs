//! Record values constructed from classified lines
//!
//! Every record keeps its raw source line; the data-bearing variants
//! additionally extract scalar fields. A malformed field inside an otherwise
//! matched line parses to None and never fails construction.

use super::kind::RecordKind;
use crate::utils::{parse_crash_time, parse_size_token};
use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn re(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("invalid extraction pattern"))
}

// ============================================================================
// DATA-BEARING LINE TYPES
// ============================================================================

/// A '#'-prefixed banner line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderLine {
    pub raw: String,
}

impl HeaderLine {
    pub fn parse(line: &str) -> Self {
        Self {
            raw: line.to_string(),
        }
    }

    /// Signal name and number from "#  SIGSEGV (0xb) at pc=..." lines
    pub fn signal(&self) -> Option<(String, Option<u32>)> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = re(
            &RE,
            r"^#\s+(SIG[A-Z0-9]+|EXCEPTION_[A-Z_]+)\s+\(0x([0-9a-fA-F]+)\)",
        )
        .captures(&self.raw)?;
        let name = caps[1].to_string();
        let number = u32::from_str_radix(&caps[2], 16).ok();
        Some((name, number))
    }

    /// Version string from "# JRE version: ... (build 21.0.1+12-LTS)"
    pub fn jre_build_version(&self) -> Option<String> {
        static RE: OnceLock<Regex> = OnceLock::new();
        re(&RE, r"^# JRE version:.*\(build ([^)]+)\)")
            .captures(&self.raw)
            .map(|c| c[1].to_string())
    }

    /// Full JRE description, vendor hints included
    pub fn jre_description(&self) -> Option<String> {
        self.raw
            .strip_prefix("# JRE version:")
            .map(|rest| rest.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Crash frame from "# C  [libc.so.6+0x18e6e1]  __memmove..." lines
    pub fn frame(&self) -> Option<(char, String)> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = re(&RE, r"^# (C|j|J|V|v)\s+(\S.*)$").captures(&self.raw)?;
        let marker = caps[1].chars().next()?;
        Some((marker, caps[2].trim_end().to_string()))
    }

    /// "# Problematic frame:" announcement line
    pub fn is_problematic_frame_marker(&self) -> bool {
        self.raw.starts_with("# Problematic frame:")
    }

    /// Native-allocation-failure banners
    pub fn is_out_of_memory(&self) -> bool {
        self.raw.contains("insufficient memory")
            || self.raw.contains("Native memory allocation")
            || self.raw.contains("java.lang.OutOfMemoryError")
    }
}

/// "Current thread (0x...): JavaThread "main" ..." line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentThreadLine {
    pub raw: String,
    pub pointer: Option<String>,
    pub description: Option<String>,
    pub stack_size: Option<u64>,
}

impl CurrentThreadLine {
    pub fn parse(line: &str) -> Self {
        static RE: OnceLock<Regex> = OnceLock::new();
        static STACK_RE: OnceLock<Regex> = OnceLock::new();

        let (pointer, description) =
            match re(&RE, r"^Current thread \((0x[0-9a-fA-F]+)\):\s*(.*)$").captures(line) {
                Some(caps) => (Some(caps[1].to_string()), Some(caps[2].trim().to_string())),
                None => (None, None),
            };

        let stack_size = re(&STACK_RE, r"stack\(0x([0-9a-fA-F]+),0x([0-9a-fA-F]+)\)")
            .captures(line)
            .and_then(|caps| {
                let from = u64::from_str_radix(&caps[1], 16).ok()?;
                let to = u64::from_str_radix(&caps[2], 16).ok()?;
                to.checked_sub(from)
            });

        Self {
            raw: line.to_string(),
            pointer,
            description,
            stack_size,
        }
    }
}

/// "siginfo: si_signo: 11 (SIGSEGV), si_code: 1 (SEGV_MAPERR), ..." line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigInfoLine {
    pub raw: String,
    pub signal_name: Option<String>,
    pub signal_number: Option<u32>,
    pub code: Option<i32>,
    pub code_name: Option<String>,
}

impl SigInfoLine {
    pub fn parse(line: &str) -> Self {
        static NEW_RE: OnceLock<Regex> = OnceLock::new();
        static OLD_RE: OnceLock<Regex> = OnceLock::new();

        let mut parsed = Self {
            raw: line.to_string(),
            signal_name: None,
            signal_number: None,
            code: None,
            code_name: None,
        };

        if let Some(caps) = re(
            &NEW_RE,
            r"si_signo:\s*(\d+)\s*\((\w+)\),\s*si_code:\s*(-?\d+)\s*\((\w+)\)",
        )
        .captures(line)
        {
            parsed.signal_number = caps[1].parse().ok();
            parsed.signal_name = Some(caps[2].to_string());
            parsed.code = caps[3].parse().ok();
            parsed.code_name = Some(caps[4].to_string());
        } else if let Some(caps) = re(
            &OLD_RE,
            r"si_signo=(\w+):\s*si_errno=-?\d+,\s*si_code=(-?\d+)(?:\s*\((\w+)\))?",
        )
        .captures(line)
        {
            parsed.signal_name = Some(caps[1].to_string());
            parsed.code = caps[2].parse().ok();
            parsed.code_name = caps.get(3).map(|m| m.as_str().to_string());
        }

        parsed
    }
}

/// "Stack: [0x...,0x...],  sp=0x...,  free space=8184k" line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackBoundsLine {
    pub raw: String,
    pub free_space: Option<u64>,
}

impl StackBoundsLine {
    pub fn parse(line: &str) -> Self {
        static RE: OnceLock<Regex> = OnceLock::new();
        let free_space = re(&RE, r"free space=(\d+[kKmM]?)")
            .captures(line)
            .and_then(|caps| parse_size_token(&caps[1]));
        Self {
            raw: line.to_string(),
            free_space,
        }
    }
}

/// One entry of the thread list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadLine {
    pub raw: String,
    pub is_java_thread: bool,
}

impl ThreadLine {
    pub fn parse(line: &str) -> Self {
        Self {
            raw: line.to_string(),
            is_java_thread: line.contains("JavaThread"),
        }
    }
}

/// The shape of one heap-table line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HeapLineKind {
    /// Generation or whole-heap sizing row ("PSYoungGen total 76288K, used 10240K ...")
    Generation {
        name: String,
        total: Option<u64>,
        used: Option<u64>,
    },
    /// "Metaspace used 3496K, capacity 4498K, committed 4864K, reserved 1056768K"
    Metaspace {
        used: Option<u64>,
        capacity: Option<u64>,
        committed: Option<u64>,
        reserved: Option<u64>,
    },
    /// Any other heap table row (spaces, region size, shared space notes)
    Other,
}

/// One line of the heap table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeapLine {
    pub raw: String,
    pub detail: HeapLineKind,
}

impl HeapLine {
    pub fn parse(line: &str) -> Self {
        static GEN_RE: OnceLock<Regex> = OnceLock::new();
        static META_RE: OnceLock<Regex> = OnceLock::new();

        let gen_pattern = r"^\s*(PSYoungGen|PSOldGen|ParOldGen|par new generation|def new generation|tenured generation|concurrent mark-sweep generation|garbage-first heap|Shenandoah|ZHeap)\s+total\s+(\d+[KMGkmg]?),\s+used\s+(\d+[KMGkmg]?)";
        let meta_pattern = r"^\s*Metaspace\s+used\s+(\d+[KMGkmg]?),\s+(?:capacity\s+(\d+[KMGkmg]?),\s+)?committed\s+(\d+[KMGkmg]?),\s+reserved\s+(\d+[KMGkmg]?)";

        let detail = if let Some(caps) = re(&GEN_RE, gen_pattern).captures(line) {
            HeapLineKind::Generation {
                name: caps[1].to_string(),
                total: parse_size_token(&caps[2]),
                used: parse_size_token(&caps[3]),
            }
        } else if let Some(caps) = re(&META_RE, meta_pattern).captures(line) {
            HeapLineKind::Metaspace {
                used: parse_size_token(&caps[1]),
                capacity: caps.get(2).and_then(|m| parse_size_token(m.as_str())),
                committed: parse_size_token(&caps[3]),
                reserved: parse_size_token(&caps[4]),
            }
        } else {
            HeapLineKind::Other
        };

        Self {
            raw: line.to_string(),
            detail,
        }
    }
}

/// "Memory: 4k page, physical 16266548k(7525296k free), swap 8257532k(8257532k free)"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfoLine {
    pub raw: String,
    pub page_size: Option<u64>,
    pub physical_total: Option<u64>,
    pub physical_free: Option<u64>,
    pub swap_total: Option<u64>,
    pub swap_free: Option<u64>,
}

impl MemoryInfoLine {
    pub fn parse(line: &str) -> Self {
        static PAGE_RE: OnceLock<Regex> = OnceLock::new();
        static PHYS_RE: OnceLock<Regex> = OnceLock::new();
        static SWAP_RE: OnceLock<Regex> = OnceLock::new();

        let page_size = re(&PAGE_RE, r"^Memory:\s+(\d+[kKmM]?)\s+page")
            .captures(line)
            .and_then(|c| parse_size_token(&c[1]));

        let (physical_total, physical_free) =
            match re(&PHYS_RE, r"physical\s+(\d+[kKmMgG]?)\s*\((\d+[kKmMgG]?)\s+free\)")
                .captures(line)
            {
                Some(c) => (parse_size_token(&c[1]), parse_size_token(&c[2])),
                None => (None, None),
            };

        let (swap_total, swap_free) =
            match re(&SWAP_RE, r"swap\s+(\d+[kKmMgG]?)\s*\((\d+[kKmMgG]?)\s+free\)").captures(line)
            {
                Some(c) => (parse_size_token(&c[1]), parse_size_token(&c[2])),
                None => (None, None),
            };

        Self {
            raw: line.to_string(),
            page_size,
            physical_total,
            physical_free,
            swap_total,
            swap_free,
        }
    }
}

/// One "[Global flags]" table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalFlagLine {
    pub raw: String,
    pub flag_type: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
    pub origin: Option<String>,
}

impl GlobalFlagLine {
    pub fn parse(line: &str) -> Self {
        static RE_FLAG: OnceLock<Regex> = OnceLock::new();
        let pattern = r"^\s*(bool|intx?|uintx?|uint64_t|size_t|double|ccstr|ccstrlist)\s+([A-Za-z0-9_]+)\s*:?=\s*(\S*)\s*(\{.*\})?\s*$";

        match re(&RE_FLAG, pattern).captures(line) {
            Some(caps) => Self {
                raw: line.to_string(),
                flag_type: Some(caps[1].to_string()),
                name: Some(caps[2].to_string()),
                value: Some(caps[3].to_string()).filter(|v| !v.is_empty()),
                origin: caps.get(4).map(|m| m.as_str().to_string()),
            },
            None => Self {
                raw: line.to_string(),
                flag_type: None,
                name: None,
                value: None,
                origin: None,
            },
        }
    }

    /// Numeric flag value, when the flag carries one
    pub fn numeric_value(&self) -> Option<u64> {
        self.value.as_deref().and_then(|v| v.parse().ok())
    }
}

/// "uname:Linux 3.10.0-1062.el7.x86_64 #1 SMP ..." line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnameLine {
    pub raw: String,
    pub os_name: Option<String>,
    pub arch: Option<String>,
    pub kernel: Option<String>,
}

impl UnameLine {
    pub fn parse(line: &str) -> Self {
        static ARCH_RE: OnceLock<Regex> = OnceLock::new();
        static KERNEL_RE: OnceLock<Regex> = OnceLock::new();

        let value = line.strip_prefix("uname:").unwrap_or(line).trim();
        let os_name = value.split_whitespace().next().map(|s| s.to_string());

        let arch = re(
            &ARCH_RE,
            r"\b(x86_64|amd64|aarch64|arm64|ppc64le|ppc64|s390x|i[3-6]86)\b",
        )
        .find(line)
        .map(|m| m.as_str().to_string());

        let kernel = re(&KERNEL_RE, r"^uname:\s*\S+\s+(\S+)")
            .captures(line)
            .map(|c| c[1].to_string());

        Self {
            raw: line.to_string(),
            os_name,
            arch,
            kernel,
        }
    }
}

/// "rlimit: STACK 8192k, CORE 0k, NPROC 77319, NOFILE 4096, AS infinity"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RlimitLine {
    pub raw: String,
    pub stack: Option<u64>,
    pub nofile: Option<u64>,
    pub nproc: Option<u64>,
}

impl RlimitLine {
    pub fn parse(line: &str) -> Self {
        static STACK_RE: OnceLock<Regex> = OnceLock::new();
        static NOFILE_RE: OnceLock<Regex> = OnceLock::new();
        static NPROC_RE: OnceLock<Regex> = OnceLock::new();

        let stack = re(&STACK_RE, r"STACK\s+(\d+[kKmM]?)")
            .captures(line)
            .and_then(|c| parse_size_token(&c[1]));
        let nofile = re(&NOFILE_RE, r"NOFILE\s+(\d+)")
            .captures(line)
            .and_then(|c| c[1].parse().ok());
        let nproc = re(&NPROC_RE, r"NPROC\s+(\d+)")
            .captures(line)
            .and_then(|c| c[1].parse().ok());

        Self {
            raw: line.to_string(),
            stack,
            nofile,
            nproc,
        }
    }
}

/// "vm_info: OpenJDK 64-Bit Server VM (25.252-b09) for linux-amd64 JRE (1.8.0_252-b09), built on Apr 14 2020 ..."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmInfoLine {
    pub raw: String,
    pub jdk_version: Option<String>,
    pub build_date: Option<NaiveDateTime>,
    pub build_user: Option<String>,
}

impl VmInfoLine {
    pub fn parse(line: &str) -> Self {
        static VERSION_RE: OnceLock<Regex> = OnceLock::new();
        static DATE_RE: OnceLock<Regex> = OnceLock::new();
        static USER_RE: OnceLock<Regex> = OnceLock::new();

        let jdk_version = re(&VERSION_RE, r"JRE \(([^)]+)\)")
            .captures(line)
            .map(|c| c[1].split_whitespace().next().unwrap_or(&c[1]).to_string());

        let build_date = re(
            &DATE_RE,
            r"built on ([A-Z][a-z]{2}\s+\d{1,2}\s+\d{4}(?:\s+\d{2}:\d{2}:\d{2})?|\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z?)",
        )
        .captures(line)
        .and_then(|c| crate::utils::parse_build_timestamp(&c[1]));

        let build_user = re(&USER_RE, r#"by "([^"]+)""#)
            .captures(line)
            .map(|c| c[1].to_string());

        Self {
            raw: line.to_string(),
            jdk_version,
            build_date,
            build_user,
        }
    }
}

/// "java_command: com.example.Main --flag" line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaCommandLine {
    pub raw: String,
    pub command: Option<String>,
}

impl JavaCommandLine {
    pub fn parse(line: &str) -> Self {
        let command = line
            .strip_prefix("java_command:")
            .map(|rest| rest.trim().to_string())
            .filter(|s| !s.is_empty() && s != "<unknown>");
        Self {
            raw: line.to_string(),
            command,
        }
    }
}

/// "jvm_args: -Xmx2g -XX:+UseG1GC" line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JvmArgsLine {
    pub raw: String,
    pub args: Option<String>,
}

impl JvmArgsLine {
    pub fn parse(line: &str) -> Self {
        let args = line
            .strip_prefix("jvm_args:")
            .map(|rest| rest.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            raw: line.to_string(),
            args,
        }
    }
}

/// "Time: Tue Aug  4 09:18:23 2020 EDT elapsed time: 1.23 seconds"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLine {
    pub raw: String,
    pub stamp: Option<NaiveDateTime>,
    pub elapsed_seconds: Option<f64>,
}

impl TimeLine {
    pub fn parse(line: &str) -> Self {
        static VALUE_RE: OnceLock<Regex> = OnceLock::new();
        static ELAPSED_RE: OnceLock<Regex> = OnceLock::new();

        let stamp = re(&VALUE_RE, r"^[Tt]ime:\s+(.*)$")
            .captures(line)
            .and_then(|c| parse_crash_time(&c[1]));

        let elapsed_seconds = re(&ELAPSED_RE, r"elapsed time:\s+([\d.]+)\s+seconds")
            .captures(line)
            .and_then(|c| c[1].parse().ok());

        Self {
            raw: line.to_string(),
            stamp,
            elapsed_seconds,
        }
    }
}

/// Standalone "elapsed time: 123456 seconds" line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElapsedTimeLine {
    pub raw: String,
    pub seconds: Option<f64>,
}

impl ElapsedTimeLine {
    pub fn parse(line: &str) -> Self {
        static RE_ELAPSED: OnceLock<Regex> = OnceLock::new();
        let seconds = re(&RE_ELAPSED, r"elapsed time:\s+([\d.]+)\s+seconds")
            .captures(line)
            .and_then(|c| c[1].parse().ok());
        Self {
            raw: line.to_string(),
            seconds,
        }
    }
}

/// "Host: myhost.example.com, Intel(R) Xeon(R) ..." line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostLine {
    pub raw: String,
    pub value: Option<String>,
}

impl HostLine {
    pub fn parse(line: &str) -> Self {
        let value = line
            .strip_prefix("Host:")
            .map(|rest| rest.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            raw: line.to_string(),
            value,
        }
    }
}

/// "CPU:total 8 (initial active 8) ..." line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfoLine {
    pub raw: String,
    pub total: Option<u32>,
}

impl CpuInfoLine {
    pub fn parse(line: &str) -> Self {
        static RE_CPU: OnceLock<Regex> = OnceLock::new();
        let total = re(&RE_CPU, r"^CPU:\s*total\s+(\d+)")
            .captures(line)
            .and_then(|c| c[1].parse().ok());
        Self {
            raw: line.to_string(),
            total,
        }
    }
}

/// "OS:Red Hat Enterprise Linux ..." header or a distro/os-release body line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsInfoLine {
    pub raw: String,
    pub description: Option<String>,
}

impl OsInfoLine {
    pub fn parse(line: &str) -> Self {
        static PRETTY_RE: OnceLock<Regex> = OnceLock::new();

        let description = if let Some(rest) = line.strip_prefix("OS:") {
            Some(rest.trim().to_string()).filter(|s| !s.is_empty())
        } else if let Some(caps) = re(&PRETTY_RE, r#"^PRETTY_NAME="?([^"]+)"?$"#).captures(line) {
            Some(caps[1].to_string())
        } else if line.starts_with(|c: char| c.is_ascii_uppercase()) && !line.contains('=') {
            // Bare distro description following an empty "OS:" header
            Some(line.trim().to_string())
        } else {
            None
        };

        Self {
            raw: line.to_string(),
            description,
        }
    }
}

// ============================================================================
// THE RECORD UNION
// ============================================================================

/// One classified unit of the crash log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Header(HeaderLine),
    CurrentThread(CurrentThreadLine),
    SigInfo(SigInfoLine),
    StackBounds(StackBoundsLine),
    Thread(ThreadLine),
    Heap(HeapLine),
    MemoryInfo(MemoryInfoLine),
    GlobalFlag(GlobalFlagLine),
    Uname(UnameLine),
    Rlimit(RlimitLine),
    VmInfo(VmInfoLine),
    JavaCommand(JavaCommandLine),
    JvmArgs(JvmArgsLine),
    Time(TimeLine),
    ElapsedTime(ElapsedTimeLine),
    Host(HostLine),
    CpuInfo(CpuInfoLine),
    OsInfo(OsInfoLine),
    /// Every kind without extracted scalars keeps kind + raw line
    Other { kind: RecordKind, raw: String },
    Unidentified { raw: String },
    Blank,
}

impl Record {
    /// The kind this record was classified as
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Header(_) => RecordKind::Header,
            Record::CurrentThread(_) => RecordKind::CurrentThread,
            Record::SigInfo(_) => RecordKind::SigInfo,
            Record::StackBounds(_) => RecordKind::StackBounds,
            Record::Thread(_) => RecordKind::Thread,
            Record::Heap(_) => RecordKind::Heap,
            Record::MemoryInfo(_) => RecordKind::MemoryInfo,
            Record::GlobalFlag(_) => RecordKind::GlobalFlag,
            Record::Uname(_) => RecordKind::Uname,
            Record::Rlimit(_) => RecordKind::Rlimit,
            Record::VmInfo(_) => RecordKind::VmInfo,
            Record::JavaCommand(_) => RecordKind::JavaCommand,
            Record::JvmArgs(_) => RecordKind::JvmArgs,
            Record::Time(_) => RecordKind::Time,
            Record::ElapsedTime(_) => RecordKind::ElapsedTime,
            Record::Host(_) => RecordKind::Host,
            Record::CpuInfo(_) => RecordKind::CpuInfo,
            Record::OsInfo(_) => RecordKind::OsInfo,
            Record::Other { kind, .. } => *kind,
            Record::Unidentified { .. } => RecordKind::Unidentified,
            Record::Blank => RecordKind::Blank,
        }
    }

    /// The raw source line
    pub fn raw(&self) -> &str {
        match self {
            Record::Header(l) => &l.raw,
            Record::CurrentThread(l) => &l.raw,
            Record::SigInfo(l) => &l.raw,
            Record::StackBounds(l) => &l.raw,
            Record::Thread(l) => &l.raw,
            Record::Heap(l) => &l.raw,
            Record::MemoryInfo(l) => &l.raw,
            Record::GlobalFlag(l) => &l.raw,
            Record::Uname(l) => &l.raw,
            Record::Rlimit(l) => &l.raw,
            Record::VmInfo(l) => &l.raw,
            Record::JavaCommand(l) => &l.raw,
            Record::JvmArgs(l) => &l.raw,
            Record::Time(l) => &l.raw,
            Record::ElapsedTime(l) => &l.raw,
            Record::Host(l) => &l.raw,
            Record::CpuInfo(l) => &l.raw,
            Record::OsInfo(l) => &l.raw,
            Record::Other { raw, .. } => raw,
            Record::Unidentified { raw } => raw,
            Record::Blank => "",
        }
    }
}

/// Construct the record value for a classified kind. Pure function of the
/// line text; exhaustive over the catalog so a kind without a constructor
/// cannot exist.
pub fn construct(kind: RecordKind, line: &str) -> Record {
    use crate::records::kind::RecordKind as K;

    match kind {
        K::Header => Record::Header(HeaderLine::parse(line)),
        K::CurrentThread => Record::CurrentThread(CurrentThreadLine::parse(line)),
        K::SigInfo => Record::SigInfo(SigInfoLine::parse(line)),
        K::StackBounds => Record::StackBounds(StackBoundsLine::parse(line)),
        K::Thread => Record::Thread(ThreadLine::parse(line)),
        K::Heap => Record::Heap(HeapLine::parse(line)),
        K::MemoryInfo => Record::MemoryInfo(MemoryInfoLine::parse(line)),
        K::GlobalFlag => Record::GlobalFlag(GlobalFlagLine::parse(line)),
        K::Uname => Record::Uname(UnameLine::parse(line)),
        K::Rlimit => Record::Rlimit(RlimitLine::parse(line)),
        K::VmInfo => Record::VmInfo(VmInfoLine::parse(line)),
        K::JavaCommand => Record::JavaCommand(JavaCommandLine::parse(line)),
        K::JvmArgs => Record::JvmArgs(JvmArgsLine::parse(line)),
        K::Time => Record::Time(TimeLine::parse(line)),
        K::ElapsedTime => Record::ElapsedTime(ElapsedTimeLine::parse(line)),
        K::Host => Record::Host(HostLine::parse(line)),
        K::CpuInfo => Record::CpuInfo(CpuInfoLine::parse(line)),
        K::OsInfo => Record::OsInfo(OsInfoLine::parse(line)),
        K::Blank => Record::Blank,
        K::Unidentified => Record::Unidentified {
            raw: line.to_string(),
        },
        // Raw-only kinds
        K::SummarySection
        | K::ThreadSection
        | K::ProcessSection
        | K::SystemSection
        | K::EndMarker
        | K::ErrorReportingNote
        | K::CommandLine
        | K::Registers
        | K::RegisterToMemoryMapping
        | K::TopOfStack
        | K::Instructions
        | K::Stack
        | K::CurrentCompileTask
        | K::JavaThreads
        | K::OtherThreads
        | K::ThreadsClassSmrInfo
        | K::VmState
        | K::VmMutex
        | K::VmOperation
        | K::HeapAddress
        | K::NarrowKlass
        | K::CompressedClassSpace
        | K::CdsArchive
        | K::HeapRegions
        | K::MetaspaceBlock
        | K::InternalStatistics
        | K::CodeCache
        | K::GcPreciousLog
        | K::GcHeapHistory
        | K::CompilationEvents
        | K::DeoptimizationEvents
        | K::ClassesLoadedEvents
        | K::ClassesUnloadedEvents
        | K::ClassesRedefinedEvents
        | K::InternalExceptionEvents
        | K::VmOperationEvents
        | K::DllOperationEvents
        | K::Events
        | K::DynamicLibraries
        | K::VmArguments
        | K::JavaClassPath
        | K::LauncherType
        | K::GlobalFlags
        | K::LogConfiguration
        | K::EnvironmentVariables
        | K::SignalHandlers
        | K::NativeMemoryTracking
        | K::PeriodicNativeTrim
        | K::OsUptime
        | K::LibcInfo
        | K::LoadAverage
        | K::ProcSysEntry
        | K::TransparentHugepage
        | K::StealTicks
        | K::Container
        | K::PageSizes
        | K::PollingPage => Record::Other {
            kind,
            raw: line.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_header_signal_extraction() {
        let header = HeaderLine::parse(
            "#  SIGSEGV (0xb) at pc=0x00007f8c7e6bb6e1, pid=12345, tid=12346",
        );
        let (name, number) = header.signal().unwrap();
        assert_eq!(name, "SIGSEGV");
        assert_eq!(number, Some(0xb));
    }

    #[test]
    fn test_header_jre_version() {
        let header = HeaderLine::parse(
            "# JRE version: OpenJDK Runtime Environment (21.0.0+35) (build 21.0.0+35-LTS)",
        );
        assert_eq!(header.jre_build_version().as_deref(), Some("21.0.0+35-LTS"));
    }

    #[test]
    fn test_header_frame() {
        let header =
            HeaderLine::parse("# C  [libc.so.6+0x18e6e1]  __memmove_avx_unaligned_erms+0x341");
        let (marker, text) = header.frame().unwrap();
        assert_eq!(marker, 'C');
        assert!(text.starts_with("[libc.so.6+0x18e6e1]"));
    }

    #[test]
    fn test_header_out_of_memory() {
        let header = HeaderLine::parse(
            "# There is insufficient memory for the Java Runtime Environment to continue.",
        );
        assert!(header.is_out_of_memory());
        assert!(!HeaderLine::parse("# Problematic frame:").is_out_of_memory());
    }

    #[test]
    fn test_current_thread_stack_size() {
        let line = "Current thread (0x00007f8c80013000):  JavaThread \"main\" [_thread_in_native, id=12346, stack(0x00007f8c88c00000,0x00007f8c89400000)]";
        let parsed = CurrentThreadLine::parse(line);
        assert_eq!(parsed.pointer.as_deref(), Some("0x00007f8c80013000"));
        assert_eq!(parsed.stack_size, Some(0x800000));
    }

    #[test]
    fn test_siginfo_new_format() {
        let parsed = SigInfoLine::parse(
            "siginfo: si_signo: 11 (SIGSEGV), si_code: 1 (SEGV_MAPERR), si_addr: 0x0000000000000000",
        );
        assert_eq!(parsed.signal_number, Some(11));
        assert_eq!(parsed.signal_name.as_deref(), Some("SIGSEGV"));
        assert_eq!(parsed.code, Some(1));
        assert_eq!(parsed.code_name.as_deref(), Some("SEGV_MAPERR"));
    }

    #[test]
    fn test_siginfo_old_format() {
        let parsed =
            SigInfoLine::parse("siginfo:si_signo=SIGSEGV: si_errno=0, si_code=1 (SEGV_MAPERR)");
        assert_eq!(parsed.signal_name.as_deref(), Some("SIGSEGV"));
        assert_eq!(parsed.code, Some(1));
    }

    #[test]
    fn test_heap_generation_line() {
        let parsed = HeapLine::parse(
            " PSYoungGen      total 76288K, used 10240K [0x00000000eab00000, 0x00000000f0000000, 0x0000000100000000)",
        );
        match parsed.detail {
            HeapLineKind::Generation { name, total, used } => {
                assert_eq!(name, "PSYoungGen");
                assert_eq!(total, Some(76288 * 1024));
                assert_eq!(used, Some(10240 * 1024));
            }
            other => panic!("unexpected heap line detail: {:?}", other),
        }
    }

    #[test]
    fn test_heap_metaspace_line() {
        let parsed = HeapLine::parse(
            " Metaspace       used 3496K, capacity 4498K, committed 4864K, reserved 1056768K",
        );
        match parsed.detail {
            HeapLineKind::Metaspace {
                used,
                capacity,
                committed,
                reserved,
            } => {
                assert_eq!(used, Some(3496 * 1024));
                assert_eq!(capacity, Some(4498 * 1024));
                assert_eq!(committed, Some(4864 * 1024));
                assert_eq!(reserved, Some(1056768 * 1024));
            }
            other => panic!("unexpected heap line detail: {:?}", other),
        }
    }

    #[test]
    fn test_memory_info_line() {
        let parsed = MemoryInfoLine::parse(
            "Memory: 4k page, physical 16266548k(7525296k free), swap 8257532k(8257532k free)",
        );
        assert_eq!(parsed.page_size, Some(4096));
        assert_eq!(parsed.physical_total, Some(16266548 * 1024));
        assert_eq!(parsed.physical_free, Some(7525296 * 1024));
        assert_eq!(parsed.swap_total, Some(8257532 * 1024));
        assert_eq!(parsed.swap_free, Some(8257532 * 1024));
    }

    #[test]
    fn test_global_flag_line() {
        let parsed = GlobalFlagLine::parse(
            "   size_t MaxHeapSize                              = 2147483648                                {product} {ergonomic}",
        );
        assert_eq!(parsed.flag_type.as_deref(), Some("size_t"));
        assert_eq!(parsed.name.as_deref(), Some("MaxHeapSize"));
        assert_eq!(parsed.numeric_value(), Some(2147483648));
        assert_eq!(parsed.origin.as_deref(), Some("{product} {ergonomic}"));
    }

    #[test]
    fn test_uname_line() {
        let parsed =
            UnameLine::parse("uname:Linux 3.10.0-1062.el7.x86_64 #1 SMP Wed Aug 7 18:08:02 UTC 2019");
        assert_eq!(parsed.os_name.as_deref(), Some("Linux"));
        assert_eq!(parsed.arch.as_deref(), Some("x86_64"));
        assert_eq!(parsed.kernel.as_deref(), Some("3.10.0-1062.el7.x86_64"));
    }

    #[test]
    fn test_rlimit_line() {
        let parsed = RlimitLine::parse(
            "rlimit: STACK 8192k, CORE 0k, NPROC 77319, NOFILE 4096, AS infinity",
        );
        assert_eq!(parsed.stack, Some(8192 * 1024));
        assert_eq!(parsed.nofile, Some(4096));
        assert_eq!(parsed.nproc, Some(77319));
    }

    #[test]
    fn test_vm_info_line() {
        let parsed = VmInfoLine::parse(
            "vm_info: OpenJDK 64-Bit Server VM (25.252-b09) for linux-amd64 JRE (1.8.0_252-b09), built on Apr 14 2020 14:55:17 by \"mockbuild\" with gcc 4.8.5",
        );
        assert_eq!(parsed.jdk_version.as_deref(), Some("1.8.0_252-b09"));
        assert_eq!(
            parsed.build_date.map(|d| d.date()),
            Some(NaiveDate::from_ymd_opt(2020, 4, 14).unwrap())
        );
        assert_eq!(parsed.build_user.as_deref(), Some("mockbuild"));
    }

    #[test]
    fn test_time_line() {
        let parsed =
            TimeLine::parse("Time: Tue Aug  4 09:18:23 2020 EDT elapsed time: 1.234567 seconds");
        assert_eq!(
            parsed.stamp.map(|d| d.date()),
            Some(NaiveDate::from_ymd_opt(2020, 8, 4).unwrap())
        );
        assert_eq!(parsed.elapsed_seconds, Some(1.234567));
    }

    #[test]
    fn test_malformed_fields_left_unset() {
        let parsed = MemoryInfoLine::parse("Memory: garbage");
        assert_eq!(parsed.physical_total, None);
        assert_eq!(parsed.swap_total, None);

        let parsed = TimeLine::parse("Time: not a real date");
        assert_eq!(parsed.stamp, None);
    }

    #[test]
    fn test_construct_is_total_over_kinds() {
        // Every catalog kind constructs, and kind() round-trips.
        for entry in crate::records::matchers::catalog() {
            let record = construct(entry.kind, "arbitrary line");
            assert_eq!(record.kind(), entry.kind);
        }
        assert_eq!(
            construct(RecordKind::Unidentified, "???").kind(),
            RecordKind::Unidentified
        );
    }

    #[test]
    fn test_os_info_variants() {
        let parsed = OsInfoLine::parse("OS:Red Hat Enterprise Linux Server release 7.7 (Maipo)");
        assert_eq!(
            parsed.description.as_deref(),
            Some("Red Hat Enterprise Linux Server release 7.7 (Maipo)")
        );

        let parsed = OsInfoLine::parse("OS:");
        assert_eq!(parsed.description, None);

        let parsed = OsInfoLine::parse("Red Hat Enterprise Linux release 8.6 (Ootpa)");
        assert_eq!(
            parsed.description.as_deref(),
            Some("Red Hat Enterprise Linux release 8.6 (Ootpa)")
        );

        let parsed = OsInfoLine::parse("PRETTY_NAME=\"Ubuntu 22.04.3 LTS\"");
        assert_eq!(parsed.description.as_deref(), Some("Ubuntu 22.04.3 LTS"));
    }
}
