//! The record catalog: one detection entry per record kind
//!
//! The catalog is a literal ordered list evaluated front to back; the first
//! entry that applies wins. Entries carrying a header sub-pattern implement
//! the header-or-continuation rule: their matcher describes every line shape
//! the kind can own (header and body), and a body-shaped line only applies
//! when the block is already open, i.e. the previous record has the same
//! kind. The order of this table is a contract; tests assert on it.

use super::kind::RecordKind;
use regex::Regex;
use std::sync::OnceLock;

/// One detection entry in the catalog
pub struct CatalogEntry {
    pub kind: RecordKind,
    matcher: Regex,
    header: Option<Regex>,
}

impl CatalogEntry {
    fn simple(kind: RecordKind, pattern: &str) -> Self {
        Self {
            kind,
            matcher: Regex::new(pattern).expect("invalid catalog pattern"),
            header: None,
        }
    }

    fn with_header(kind: RecordKind, pattern: &str, header_pattern: &str) -> Self {
        Self {
            kind,
            matcher: Regex::new(pattern).expect("invalid catalog pattern"),
            header: Some(Regex::new(header_pattern).expect("invalid catalog header pattern")),
        }
    }

    /// Raw shape test, ignoring context
    pub fn matches(&self, line: &str) -> bool {
        self.matcher.is_match(line)
    }

    /// Header sub-pattern test (false for kinds without one)
    pub fn matches_header(&self, line: &str) -> bool {
        self.header.as_ref().map(|h| h.is_match(line)).unwrap_or(false)
    }

    /// Full applicability test: shape plus the header-or-continuation rule
    pub fn applies(&self, line: &str, prior: Option<RecordKind>) -> bool {
        if !self.matcher.is_match(line) {
            return false;
        }
        match &self.header {
            None => true,
            Some(header) => header.is_match(line) || prior == Some(self.kind),
        }
    }
}

static CATALOG: OnceLock<Vec<CatalogEntry>> = OnceLock::new();

/// The ordered catalog, compiled once per process
pub fn catalog() -> &'static [CatalogEntry] {
    CATALOG.get_or_init(build_catalog).as_slice()
}

/// Shared body grammar of every event table
const EVENT_BODY: &str = r"^Event:|^No events$|^<truncated>|^\s+\S";

fn build_catalog() -> Vec<CatalogEntry> {
    use crate::records::kind::RecordKind as K;
    use crate::records::matchers::CatalogEntry as E;

    vec![
        // Structure first: blank lines close any open block, section marks
        // are unambiguous.
        E::simple(K::Blank, r"^\s*$"),
        E::simple(K::ThreadSection, r"^-+\s+T H R E A D\s+-+$"),
        E::simple(K::ProcessSection, r"^-+\s+P R O C E S S\s+-+$"),
        E::simple(K::SystemSection, r"^-+\s+S Y S T E M\s+-+$"),
        E::simple(K::SummarySection, r"^-+\s+S U M M A R Y\s+-+$"),
        E::simple(K::EndMarker, r"^END\.$"),
        E::simple(
            K::ErrorReportingNote,
            r"^\[(error|timeout) occurred during error reporting",
        ),
        // Log-output lines "#0: stdout ..." share the '#' prefix with the
        // banner; this entry must precede Header so the open block wins.
        E::with_header(
            K::LogConfiguration,
            r"^Logging:$|^Log output configuration:|^\s*#\d+:\s",
            r"^Logging:$",
        ),
        E::simple(K::Header, r"^#"),
        // Summary section
        E::simple(K::CommandLine, r"^Command Line:"),
        E::simple(K::Host, r"^Host:"),
        E::simple(K::Time, r"^[Tt]ime:\s"),
        E::simple(K::ElapsedTime, r"^elapsed time:\s"),
        // Thread section
        E::simple(K::CurrentThread, r"^Current thread"),
        E::simple(K::SigInfo, r"^siginfo:"),
        E::with_header(
            K::Registers,
            r"^Registers:$|^(\s*[A-Za-z]{1,6}[0-9]{0,2}\s?=\s?0x[0-9a-fA-F]+[,;]?)+\s*$",
            r"^Registers:$",
        ),
        E::with_header(
            K::RegisterToMemoryMapping,
            r"^Register to memory mapping:$|^[A-Za-z]{1,6}[0-9]{0,2}=\S|^\s+- |^0x[0-9a-fA-F]+ (is|points)",
            r"^Register to memory mapping:$",
        ),
        E::with_header(
            K::TopOfStack,
            r"^Top of Stack:|^0x[0-9a-fA-F]+:\s",
            r"^Top of Stack:",
        ),
        E::with_header(
            K::Instructions,
            r"^Instructions: \(pc=|^0x[0-9a-fA-F]+:\s|^\s+0x[0-9a-fA-F]+:\s",
            r"^Instructions: \(pc=",
        ),
        E::simple(K::StackBounds, r"^Stack: \[0x"),
        E::with_header(
            K::Stack,
            r"^(Native frames:|Java frames:)|^C\s+\[|^V\s+\[|^j\s+\S|^J\s+\d|^v\s+~|^\.\.\.",
            r"^(Native frames:|Java frames:)",
        ),
        E::with_header(
            K::CurrentCompileTask,
            r"^Current CompileTask:$|^C[12]:",
            r"^Current CompileTask:$",
        ),
        // Process section
        E::simple(K::JavaThreads, r"^Java Threads:"),
        E::simple(K::OtherThreads, r"^Other Threads:"),
        E::simple(
            K::Thread,
            r"^\s*(=>)?\s*0x[0-9a-fA-F]+\s+(Java|VM|Watcher|GCTask|Worker|ConcurrentGC|NonJava)?Thread",
        ),
        E::with_header(
            K::ThreadsClassSmrInfo,
            r"^Threads class SMR info:$|^_java_thread_list=|^\s*(length=|elements=\{)|^\s*0x[0-9a-fA-F]+(, 0x[0-9a-fA-F]+)*,?$|^\}$",
            r"^Threads class SMR info:$",
        ),
        E::simple(K::VmState, r"^VM state:"),
        E::with_header(
            K::VmMutex,
            r"^VM Mutex/Monitor currently owned by a thread|^\[0x",
            r"^VM Mutex/Monitor currently owned by a thread",
        ),
        E::simple(K::VmOperation, r"^VM_Operation"),
        E::simple(K::HeapAddress, r"^[Hh]eap address:"),
        E::simple(K::NarrowKlass, r"^Narrow klass"),
        E::simple(K::CompressedClassSpace, r"^Compressed class space"),
        E::simple(K::CdsArchive, r"^CDS archive"),
        E::with_header(
            K::Heap,
            r"^Heap:?$|^ +(PSYoungGen|PSOldGen|ParOldGen|PSPermGen|par new generation|def new generation|tenured generation|concurrent mark-sweep generation|garbage-first heap|region size|Shenandoah|ZHeap|object space|eden space|from space|to space|the space|ro space|rw space|compacting perm gen|Metaspace|class space|No shared spaces)\b",
            r"^Heap:?$",
        ),
        E::with_header(K::HeapRegions, r"^Heap Regions:|^\s*\|", r"^Heap Regions:"),
        E::with_header(
            K::MetaspaceBlock,
            r"^Metaspace:$|^\s+(Usage|Virtual space|Chunk freelists|MaxMetaspaceSize|CompressedClassSpaceSize|InitialBootClassLoaderMetaspaceSize|Both|Non-[Cc]lass( space)?|Class( space)?):",
            r"^Metaspace:$",
        ),
        E::with_header(
            K::InternalStatistics,
            r"^Internal statistics:$|^\s*\w+:\s*\d+\.?$",
            r"^Internal statistics:$",
        ),
        E::with_header(
            K::CodeCache,
            r"^CodeCache:|^CodeHeap '[^']+':|^\s+(bounds|total_blobs|nmethods|adapters|compilation|stopped_count|full_count)\b",
            r"^CodeCache:|^CodeHeap '[^']+':",
        ),
        E::with_header(
            K::GcPreciousLog,
            r"^GC Precious Log:$|^\s+[A-Z][\w /-]*:",
            r"^GC Precious Log:$",
        ),
        E::with_header(
            K::GcHeapHistory,
            r"^GC Heap History \(\d+ events\):$|^Event:|^No events$|^\{Heap (before|after)|^\}|^ +\S",
            r"^GC Heap History \(\d+ events\):$",
        ),
        E::with_header(
            K::CompilationEvents,
            &format!(r"^Compilation events \(\d+ events\):$|{}", EVENT_BODY),
            r"^Compilation events \(\d+ events\):$",
        ),
        E::with_header(
            K::DeoptimizationEvents,
            &format!(r"^Deoptimization events \(\d+ events\):$|{}", EVENT_BODY),
            r"^Deoptimization events \(\d+ events\):$",
        ),
        E::with_header(
            K::ClassesLoadedEvents,
            &format!(r"^Classes loaded \(\d+ events\):$|{}", EVENT_BODY),
            r"^Classes loaded \(\d+ events\):$",
        ),
        E::with_header(
            K::ClassesUnloadedEvents,
            &format!(r"^Classes unloaded \(\d+ events\):$|{}", EVENT_BODY),
            r"^Classes unloaded \(\d+ events\):$",
        ),
        E::with_header(
            K::ClassesRedefinedEvents,
            &format!(r"^Classes redefined \(\d+ events\):$|{}", EVENT_BODY),
            r"^Classes redefined \(\d+ events\):$",
        ),
        E::with_header(
            K::InternalExceptionEvents,
            &format!(r"^Internal exceptions \(\d+ events\):$|{}", EVENT_BODY),
            r"^Internal exceptions \(\d+ events\):$",
        ),
        E::with_header(
            K::VmOperationEvents,
            &format!(r"^VM Operations \(\d+ events\):$|{}", EVENT_BODY),
            r"^VM Operations \(\d+ events\):$",
        ),
        E::with_header(
            K::DllOperationEvents,
            &format!(r"^Dll operation events \(\d+ events\):$|{}", EVENT_BODY),
            r"^Dll operation events \(\d+ events\):$",
        ),
        E::with_header(
            K::Events,
            &format!(r"^Events \(\d+ events\):$|{}", EVENT_BODY),
            r"^Events \(\d+ events\):$",
        ),
        E::with_header(
            K::DynamicLibraries,
            r"^Dynamic libraries:$|^[0-9a-fA-F]{4,}-[0-9a-fA-F]{4,}\s+[rwxps-]{4}|^0x[0-9a-fA-F]+ - 0x[0-9a-fA-F]+\s",
            r"^Dynamic libraries:$",
        ),
        E::simple(K::VmArguments, r"^VM Arguments:$"),
        E::simple(K::JvmArgs, r"^jvm_args:"),
        E::simple(K::JavaCommand, r"^java_command:"),
        E::simple(K::JavaClassPath, r"^java_class_path"),
        E::simple(K::LauncherType, r"^Launcher Type:"),
        E::simple(K::GlobalFlags, r"^\[Global flags\]$"),
        E::simple(
            K::GlobalFlag,
            r"^\s*(bool|intx?|uintx?|uint64_t|size_t|double|ccstr|ccstrlist)\s+[A-Za-z0-9_]+\s*:?=",
        ),
        E::with_header(
            K::EnvironmentVariables,
            r"^Environment Variables:$|^[A-Z_][A-Z0-9_]*=",
            r"^Environment Variables:$",
        ),
        E::with_header(
            K::SignalHandlers,
            r"^Signal Handlers:$|^\s*SIG[A-Z0-9+]+[:,]|^\s{3,}\S",
            r"^Signal Handlers:$",
        ),
        E::with_header(
            K::NativeMemoryTracking,
            r"^Native Memory Tracking:$|^Total:|^\s*-\s+\S|^\s+\((reserved|committed|mmap|malloc|arena|tracking)",
            r"^Native Memory Tracking:$",
        ),
        E::simple(K::PeriodicNativeTrim, r"^Periodic native trim"),
        // System section
        E::with_header(
            K::OsInfo,
            r"^OS:|^\s*(Red Hat|CentOS|Ubuntu|Debian|Fedora|SUSE|openSUSE|Oracle Linux|Amazon Linux|Rocky Linux|AlmaLinux|Alpine|Windows|Mac OS|macOS|DISTRIB_|NAME=|PRETTY_NAME=|VERSION=|ID=)",
            r"^OS:",
        ),
        E::simple(K::OsUptime, r"^OS uptime:"),
        E::simple(K::Uname, r"^uname:"),
        E::simple(K::LibcInfo, r"^libc:"),
        E::simple(K::Rlimit, r"^rlimit"),
        E::simple(K::LoadAverage, r"^load average:"),
        E::with_header(K::ProcSysEntry, r"^/proc/sys/\S+|^\d+$", r"^/proc/sys/\S+"),
        E::with_header(
            K::TransparentHugepage,
            r"^/sys/kernel/mm/transparent_hugepage|\[(always|madvise|never|defer)\]|^(always|within_size|advise|never)$",
            r"^/sys/kernel/mm/transparent_hugepage",
        ),
        E::simple(K::StealTicks, r"^Steal ticks"),
        E::with_header(
            K::Container,
            r"^container \(cgroup\) information:$|^(container_type|cpu_\w+|active_processor_count|memory_\w+|current number of|maximum number of|kernel_\w+)\b",
            r"^container \(cgroup\) information:$",
        ),
        E::with_header(
            K::CpuInfo,
            r"^CPU:|^CPU Model and flags|^\s*model name\s|^\s*flags\s|^\s*cache size\s|^\s*<.*>$|^Online cpus:|^Offline cpus:|^BIOS frequency limitation:|^Frequency switch latency|^Available cpu frequencies:|^Current governor:|^Core performance",
            r"^CPU:",
        ),
        E::simple(K::PageSizes, r"^Page Sizes:"),
        E::simple(K::MemoryInfo, r"^Memory:"),
        E::simple(K::PollingPage, r"^Polling page:"),
        E::simple(K::VmInfo, r"^vm_info:"),
    ]
}
