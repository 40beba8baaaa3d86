//! The closed set of record kinds a crash log line can classify as
//!
//! One variant per logical record in the hs_err grammar. The classification
//! engine resolves every input line to exactly one of these; Unidentified is
//! the universal fallback.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Record kinds, one per crash log line family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    // === STRUCTURE ===
    /// Empty or whitespace-only line
    Blank,
    /// '#'-prefixed banner line at the top of the log
    Header,
    /// "---------------  S U M M A R Y ------------"
    SummarySection,
    /// "---------------  T H R E A D  ---------------"
    ThreadSection,
    /// "---------------  P R O C E S S  ---------------"
    ProcessSection,
    /// "---------------  S Y S T E M  ---------------"
    SystemSection,
    /// Terminal "END." marker
    EndMarker,
    /// "[error occurred during error reporting ...]" interjection
    ErrorReportingNote,

    // === SUMMARY SECTION ===
    CommandLine,
    Host,
    Time,
    ElapsedTime,

    // === THREAD SECTION ===
    CurrentThread,
    SigInfo,
    Registers,
    RegisterToMemoryMapping,
    TopOfStack,
    Instructions,
    StackBounds,
    Stack,
    CurrentCompileTask,

    // === PROCESS SECTION ===
    JavaThreads,
    OtherThreads,
    Thread,
    ThreadsClassSmrInfo,
    VmState,
    VmMutex,
    VmOperation,
    HeapAddress,
    NarrowKlass,
    CompressedClassSpace,
    CdsArchive,
    Heap,
    HeapRegions,
    MetaspaceBlock,
    InternalStatistics,
    CodeCache,
    GcPreciousLog,
    GcHeapHistory,
    CompilationEvents,
    DeoptimizationEvents,
    ClassesLoadedEvents,
    ClassesUnloadedEvents,
    ClassesRedefinedEvents,
    InternalExceptionEvents,
    VmOperationEvents,
    DllOperationEvents,
    Events,
    DynamicLibraries,
    VmArguments,
    JvmArgs,
    JavaCommand,
    JavaClassPath,
    LauncherType,
    GlobalFlags,
    GlobalFlag,
    LogConfiguration,
    EnvironmentVariables,
    SignalHandlers,
    NativeMemoryTracking,
    PeriodicNativeTrim,

    // === SYSTEM SECTION ===
    OsInfo,
    OsUptime,
    Uname,
    LibcInfo,
    Rlimit,
    LoadAverage,
    ProcSysEntry,
    TransparentHugepage,
    StealTicks,
    Container,
    CpuInfo,
    PageSizes,
    MemoryInfo,
    PollingPage,
    VmInfo,

    // === FALLBACK ===
    Unidentified,
}

impl RecordKind {
    /// Stable name used in logs and structured output
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Blank => "Blank",
            RecordKind::Header => "Header",
            RecordKind::SummarySection => "SummarySection",
            RecordKind::ThreadSection => "ThreadSection",
            RecordKind::ProcessSection => "ProcessSection",
            RecordKind::SystemSection => "SystemSection",
            RecordKind::EndMarker => "EndMarker",
            RecordKind::ErrorReportingNote => "ErrorReportingNote",
            RecordKind::CommandLine => "CommandLine",
            RecordKind::Host => "Host",
            RecordKind::Time => "Time",
            RecordKind::ElapsedTime => "ElapsedTime",
            RecordKind::CurrentThread => "CurrentThread",
            RecordKind::SigInfo => "SigInfo",
            RecordKind::Registers => "Registers",
            RecordKind::RegisterToMemoryMapping => "RegisterToMemoryMapping",
            RecordKind::TopOfStack => "TopOfStack",
            RecordKind::Instructions => "Instructions",
            RecordKind::StackBounds => "StackBounds",
            RecordKind::Stack => "Stack",
            RecordKind::CurrentCompileTask => "CurrentCompileTask",
            RecordKind::JavaThreads => "JavaThreads",
            RecordKind::OtherThreads => "OtherThreads",
            RecordKind::Thread => "Thread",
            RecordKind::ThreadsClassSmrInfo => "ThreadsClassSmrInfo",
            RecordKind::VmState => "VmState",
            RecordKind::VmMutex => "VmMutex",
            RecordKind::VmOperation => "VmOperation",
            RecordKind::HeapAddress => "HeapAddress",
            RecordKind::NarrowKlass => "NarrowKlass",
            RecordKind::CompressedClassSpace => "CompressedClassSpace",
            RecordKind::CdsArchive => "CdsArchive",
            RecordKind::Heap => "Heap",
            RecordKind::HeapRegions => "HeapRegions",
            RecordKind::MetaspaceBlock => "MetaspaceBlock",
            RecordKind::InternalStatistics => "InternalStatistics",
            RecordKind::CodeCache => "CodeCache",
            RecordKind::GcPreciousLog => "GcPreciousLog",
            RecordKind::GcHeapHistory => "GcHeapHistory",
            RecordKind::CompilationEvents => "CompilationEvents",
            RecordKind::DeoptimizationEvents => "DeoptimizationEvents",
            RecordKind::ClassesLoadedEvents => "ClassesLoadedEvents",
            RecordKind::ClassesUnloadedEvents => "ClassesUnloadedEvents",
            RecordKind::ClassesRedefinedEvents => "ClassesRedefinedEvents",
            RecordKind::InternalExceptionEvents => "InternalExceptionEvents",
            RecordKind::VmOperationEvents => "VmOperationEvents",
            RecordKind::DllOperationEvents => "DllOperationEvents",
            RecordKind::Events => "Events",
            RecordKind::DynamicLibraries => "DynamicLibraries",
            RecordKind::VmArguments => "VmArguments",
            RecordKind::JvmArgs => "JvmArgs",
            RecordKind::JavaCommand => "JavaCommand",
            RecordKind::JavaClassPath => "JavaClassPath",
            RecordKind::LauncherType => "LauncherType",
            RecordKind::GlobalFlags => "GlobalFlags",
            RecordKind::GlobalFlag => "GlobalFlag",
            RecordKind::LogConfiguration => "LogConfiguration",
            RecordKind::EnvironmentVariables => "EnvironmentVariables",
            RecordKind::SignalHandlers => "SignalHandlers",
            RecordKind::NativeMemoryTracking => "NativeMemoryTracking",
            RecordKind::PeriodicNativeTrim => "PeriodicNativeTrim",
            RecordKind::OsInfo => "OsInfo",
            RecordKind::OsUptime => "OsUptime",
            RecordKind::Uname => "Uname",
            RecordKind::LibcInfo => "LibcInfo",
            RecordKind::Rlimit => "Rlimit",
            RecordKind::LoadAverage => "LoadAverage",
            RecordKind::ProcSysEntry => "ProcSysEntry",
            RecordKind::TransparentHugepage => "TransparentHugepage",
            RecordKind::StealTicks => "StealTicks",
            RecordKind::Container => "Container",
            RecordKind::CpuInfo => "CpuInfo",
            RecordKind::PageSizes => "PageSizes",
            RecordKind::MemoryInfo => "MemoryInfo",
            RecordKind::PollingPage => "PollingPage",
            RecordKind::VmInfo => "VmInfo",
            RecordKind::Unidentified => "Unidentified",
        }
    }

    /// Section delimiter lines
    pub fn is_section_mark(&self) -> bool {
        matches!(
            self,
            RecordKind::SummarySection
                | RecordKind::ThreadSection
                | RecordKind::ProcessSection
                | RecordKind::SystemSection
        )
    }

    /// Event-table kinds (all share the "Event:" body grammar)
    pub fn is_event_table(&self) -> bool {
        matches!(
            self,
            RecordKind::GcHeapHistory
                | RecordKind::CompilationEvents
                | RecordKind::DeoptimizationEvents
                | RecordKind::ClassesLoadedEvents
                | RecordKind::ClassesUnloadedEvents
                | RecordKind::ClassesRedefinedEvents
                | RecordKind::InternalExceptionEvents
                | RecordKind::VmOperationEvents
                | RecordKind::DllOperationEvents
                | RecordKind::Events
        )
    }

    /// Kinds folded into the ordered VM-event sequence fact
    pub fn is_vm_event(&self) -> bool {
        self.is_event_table() && !matches!(self, RecordKind::GcHeapHistory)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_round_trip_spot_checks() {
        assert_eq!(RecordKind::Heap.as_str(), "Heap");
        assert_eq!(RecordKind::Unidentified.as_str(), "Unidentified");
        assert_eq!(format!("{}", RecordKind::SigInfo), "SigInfo");
    }

    #[test]
    fn test_section_marks() {
        assert!(RecordKind::ThreadSection.is_section_mark());
        assert!(!RecordKind::Heap.is_section_mark());
    }

    #[test]
    fn test_event_tables() {
        assert!(RecordKind::CompilationEvents.is_event_table());
        assert!(RecordKind::GcHeapHistory.is_event_table());
        assert!(!RecordKind::GcHeapHistory.is_vm_event());
        assert!(RecordKind::DeoptimizationEvents.is_vm_event());
        assert!(!RecordKind::Stack.is_event_table());
    }
}
