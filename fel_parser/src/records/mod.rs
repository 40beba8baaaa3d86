//! The record catalog: kinds, detection entries, and record constructors

pub mod kind;
pub mod matchers;
pub mod record;

pub use kind::RecordKind;
pub use matchers::{catalog, CatalogEntry};
pub use record::{
    construct, CpuInfoLine, CurrentThreadLine, ElapsedTimeLine, GlobalFlagLine, HeaderLine,
    HeapLine, HeapLineKind, HostLine, JavaCommandLine, JvmArgsLine, MemoryInfoLine, OsInfoLine,
    Record, RlimitLine, SigInfoLine, StackBoundsLine, ThreadLine, TimeLine, UnameLine, VmInfoLine,
};
