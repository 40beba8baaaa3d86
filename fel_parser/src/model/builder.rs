//! Fact model builder: a strict left fold over the classified records
//!
//! One pass, no backtracking. Singleton facts overwrite, sequence facts
//! append, the unidentified list stops growing at the cap while everything
//! else keeps folding.

use super::fact_model::{CrashFrame, FatalErrorLog};
use crate::config::constants::compile_time::classification::MAX_UNIDENTIFIED_LINES;
use crate::log_success;
use crate::records::{HeapLineKind, Record, RecordKind};

/// Folds records into a fact model
pub struct LogBuilder {
    log: FatalErrorLog,
    /// Set after a "# Problematic frame:" banner; the next header line that
    /// carries a frame shape resolves it
    expect_problematic_frame: bool,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self {
            log: FatalErrorLog::default(),
            expect_problematic_frame: false,
        }
    }

    /// Fold one record into the model
    pub fn push(&mut self, record: Record) {
        self.log.record_count += 1;

        match record {
            Record::Header(header) => {
                if let Some((name, number)) = header.signal() {
                    self.log.signal_name = Some(name);
                    self.log.signal_number = number;
                }
                if let Some(version) = header.jre_build_version() {
                    self.log.jdk_version = Some(version);
                }
                if let Some(description) = header.jre_description() {
                    self.log.jre_description = Some(description);
                }
                if header.is_out_of_memory() {
                    self.log.out_of_memory_banner = true;
                }

                if self.expect_problematic_frame {
                    if let Some((marker, text)) = header.frame() {
                        self.log.problematic_frame = Some(CrashFrame { marker, text });
                    }
                    self.expect_problematic_frame = false;
                }
                if header.is_problematic_frame_marker() {
                    self.expect_problematic_frame = true;
                }

                self.log.header_lines.push(header.raw);
            }

            Record::CurrentThread(line) => {
                self.log.current_thread = line.description.clone().or(Some(line.raw.clone()));
                if line.stack_size.is_some() {
                    self.log.current_thread_stack_size = line.stack_size;
                }
            }

            Record::SigInfo(line) => {
                if line.signal_name.is_some() {
                    self.log.signal_name = line.signal_name;
                }
                if line.signal_number.is_some() {
                    self.log.signal_number = line.signal_number;
                }
                if line.code.is_some() {
                    self.log.signal_code = line.code;
                }
                if line.code_name.is_some() {
                    self.log.signal_code_name = line.code_name;
                }
            }

            Record::StackBounds(line) => {
                if line.free_space.is_some() {
                    self.log.stack_free_space = line.free_space;
                }
            }

            Record::Thread(line) => {
                if line.is_java_thread {
                    self.log.java_thread_count += 1;
                }
                self.log.thread_lines.push(line.raw);
            }

            Record::Heap(line) => match line.detail {
                HeapLineKind::Generation { total, used, .. } => {
                    if let Some(total) = total {
                        self.log.heap_allocated =
                            Some(self.log.heap_allocated.unwrap_or(0) + total);
                    }
                    if let Some(used) = used {
                        self.log.heap_used = Some(self.log.heap_used.unwrap_or(0) + used);
                    }
                }
                HeapLineKind::Metaspace {
                    used,
                    capacity,
                    committed,
                    reserved,
                } => {
                    if used.is_some() {
                        self.log.metaspace_used = used;
                    }
                    if committed.or(capacity).is_some() {
                        self.log.metaspace_allocated = committed.or(capacity);
                    }
                    if reserved.is_some() {
                        self.log.metaspace_max = reserved;
                    }
                }
                HeapLineKind::Other => {}
            },

            Record::MemoryInfo(line) => {
                if line.page_size.is_some() {
                    self.log.page_size = line.page_size;
                }
                if line.physical_total.is_some() {
                    self.log.physical_memory_total = line.physical_total;
                }
                if line.physical_free.is_some() {
                    self.log.physical_memory_free = line.physical_free;
                }
                if line.swap_total.is_some() {
                    self.log.swap_total = line.swap_total;
                }
                if line.swap_free.is_some() {
                    self.log.swap_free = line.swap_free;
                }
            }

            Record::GlobalFlag(line) => {
                match line.name.as_deref() {
                    Some("MaxHeapSize") => {
                        if let Some(value) = line.numeric_value() {
                            self.log.heap_max = Some(value);
                        }
                    }
                    Some("MaxMetaspaceSize") => {
                        if let Some(value) = line.numeric_value() {
                            self.log.metaspace_max = Some(value);
                        }
                    }
                    // ThreadStackSize is expressed in kilobytes
                    Some("ThreadStackSize") => {
                        if let Some(value) = line.numeric_value() {
                            self.log.thread_stack_size_flag = value.checked_mul(1024);
                        }
                    }
                    _ => {}
                }
                self.log.global_flags.push(line);
            }

            Record::Uname(line) => {
                if line.arch.is_some() {
                    self.log.architecture = line.arch;
                }
                if line.kernel.is_some() {
                    self.log.kernel = line.kernel;
                }
            }

            Record::Rlimit(line) => {
                if line.stack.is_some() {
                    self.log.rlimit_stack = line.stack;
                }
            }

            Record::VmInfo(line) => {
                if line.jdk_version.is_some() {
                    self.log.jdk_version = line.jdk_version;
                }
                if line.build_date.is_some() {
                    self.log.build_date = line.build_date;
                }
                if line.build_user.is_some() {
                    self.log.build_user = line.build_user;
                }
                self.log.vm_info = Some(line.raw);
            }

            Record::JavaCommand(line) => {
                if line.command.is_some() {
                    self.log.java_command = line.command;
                }
            }

            Record::JvmArgs(line) => {
                if line.args.is_some() {
                    self.log.jvm_args = line.args;
                }
            }

            Record::Time(line) => {
                if line.stamp.is_some() {
                    self.log.crash_time = line.stamp;
                }
                if line.elapsed_seconds.is_some() {
                    self.log.elapsed_seconds = line.elapsed_seconds;
                }
            }

            Record::ElapsedTime(line) => {
                if line.seconds.is_some() {
                    self.log.elapsed_seconds = line.seconds;
                }
            }

            Record::Host(line) => {
                if line.value.is_some() {
                    self.log.host = line.value;
                }
            }

            Record::CpuInfo(line) => {
                if line.total.is_some() {
                    self.log.cpu_count = line.total;
                }
            }

            Record::OsInfo(line) => {
                if line.description.is_some() {
                    self.log.os_description = line.description;
                }
            }

            Record::Other { kind, raw } => self.push_other(kind, raw),

            Record::Unidentified { raw } => {
                if self.log.unidentified_lines.len() < MAX_UNIDENTIFIED_LINES {
                    self.log.unidentified_lines.push(raw);
                } else {
                    self.log.unidentified_dropped += 1;
                }
            }

            Record::Blank => {}
        }
    }

    /// Sequence-fact routing for the raw-only kinds
    fn push_other(&mut self, kind: RecordKind, raw: String) {
        match kind {
            RecordKind::Stack => {
                // Frame lines only; the "Native frames:" banner is structure
                if !raw.starts_with("Native frames:") && !raw.starts_with("Java frames:") {
                    self.log.stack_lines.push(raw);
                }
            }
            RecordKind::DynamicLibraries => {
                if raw != "Dynamic libraries:" {
                    self.log.dynamic_libraries.push(raw);
                }
            }
            RecordKind::EnvironmentVariables => {
                if raw != "Environment Variables:" {
                    self.log.environment_lines.push(raw);
                }
            }
            kind if kind.is_vm_event() => {
                if raw.starts_with("Event:") {
                    self.log.vm_events.push(raw);
                }
            }
            _ => {}
        }
    }

    /// Complete the fold and freeze the model
    pub fn finish(self) -> FatalErrorLog {
        log_success!(
            crate::logging::codes::success::FOLD_COMPLETE,
            "Fact model fold completed",
            "records" => self.log.record_count,
            "headers" => self.log.header_lines.len(),
            "stack_lines" => self.log.stack_lines.len(),
            "vm_events" => self.log.vm_events.len(),
            "unidentified" => self.log.unidentified_lines.len(),
            "unidentified_dropped" => self.log.unidentified_dropped
        );
        self.log
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold an ordered record sequence into a fact model
pub fn fold<I>(records: I) -> FatalErrorLog
where
    I: IntoIterator<Item = Record>,
{
    let mut builder = LogBuilder::new();
    for record in records {
        builder.push(record);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::construct;

    fn fold_lines(lines: &[&str]) -> FatalErrorLog {
        let mut engine = crate::classification::ClassificationEngine::new();
        fold(lines.iter().map(|l| engine.classify_and_construct(l)))
    }

    #[test]
    fn test_singleton_overwrite_last_wins() {
        let model = fold_lines(&[
            "Memory: 4k page, physical 1000000k(500000k free), swap 100000k(100000k free)",
            "Memory: 4k page, physical 2000000k(600000k free), swap 200000k(150000k free)",
        ]);
        assert_eq!(model.physical_memory_total, Some(2000000 * 1024));
        assert_eq!(model.physical_memory_free, Some(600000 * 1024));
        assert_eq!(model.swap_total, Some(200000 * 1024));
    }

    #[test]
    fn test_unidentified_cap() {
        let mut engine = crate::classification::ClassificationEngine::new();
        let mut builder = LogBuilder::new();

        for i in 0..(MAX_UNIDENTIFIED_LINES + 250) {
            let line = format!("?garbage line number {}?", i);
            builder.push(engine.classify_and_construct(&line));
        }
        // Identified records keep folding past the cap
        builder.push(engine.classify_and_construct(
            "Memory: 4k page, physical 1000000k(500000k free), swap 0k(0k free)",
        ));

        let model = builder.finish();
        assert_eq!(model.unidentified_lines.len(), MAX_UNIDENTIFIED_LINES);
        assert_eq!(model.unidentified_dropped, 250);
        assert_eq!(model.physical_memory_total, Some(1000000 * 1024));
    }

    #[test]
    fn test_problematic_frame_capture() {
        let model = fold_lines(&[
            "# Problematic frame:",
            "# C  [libc.so.6+0x18e6e1]",
        ]);
        let frame = model.problematic_frame.unwrap();
        assert_eq!(frame.marker, 'C');
        assert_eq!(frame.text, "[libc.so.6+0x18e6e1]");
        assert!(!frame.has_debug_symbols());
    }

    #[test]
    fn test_signal_facts_siginfo_overwrites_header() {
        let model = fold_lines(&[
            "#  SIGBUS (0x7) at pc=0x00007f8c7e6bb6e1, pid=12345, tid=12346",
            "siginfo: si_signo: 11 (SIGSEGV), si_code: 1 (SEGV_MAPERR), si_addr: 0x0000000000000000",
        ]);
        // The later, more precise record wins
        assert_eq!(model.signal_name.as_deref(), Some("SIGSEGV"));
        assert_eq!(model.signal_number, Some(11));
        assert_eq!(model.signal_code, Some(1));
    }

    #[test]
    fn test_heap_accumulation() {
        let model = fold_lines(&[
            "Heap:",
            " PSYoungGen      total 76288K, used 10240K [0x0, 0x0, 0x0)",
            " ParOldGen       total 175104K, used 1024K [0x0, 0x0, 0x0)",
            " Metaspace       used 3496K, capacity 4498K, committed 4864K, reserved 1056768K",
        ]);
        assert_eq!(model.heap_allocated, Some((76288 + 175104) * 1024));
        assert_eq!(model.heap_used, Some((10240 + 1024) * 1024));
        assert_eq!(model.metaspace_used, Some(3496 * 1024));
        assert_eq!(model.metaspace_allocated, Some(4864 * 1024));
        assert_eq!(model.metaspace_max, Some(1056768 * 1024));
    }

    #[test]
    fn test_global_flag_singletons() {
        let model = fold_lines(&[
            "[Global flags]",
            "   size_t MaxHeapSize                              = 2147483648                                {product} {ergonomic}",
            "     intx ThreadStackSize                          = 1024                                      {pd product}",
        ]);
        assert_eq!(model.heap_max, Some(2147483648));
        assert_eq!(model.thread_stack_size_flag, Some(1024 * 1024));
        assert_eq!(model.global_flags.len(), 2);
    }

    #[test]
    fn test_sequence_order_preserved() {
        let model = fold_lines(&[
            "Native frames: (J=compiled Java code, j=interpreted, Vv=VM code, C=native code)",
            "C  [libc.so.6+0x18e6e1]",
            "j  java.lang.Thread.run()V+11",
            "v  ~StubRoutines::call_stub",
        ]);
        assert_eq!(
            model.stack_lines,
            vec![
                "C  [libc.so.6+0x18e6e1]",
                "j  java.lang.Thread.run()V+11",
                "v  ~StubRoutines::call_stub",
            ]
        );
    }

    #[test]
    fn test_vm_events_collected_in_order() {
        let model = fold_lines(&[
            "Compilation events (10 events):",
            "Event: 0.100 Thread 0x1 1 3 java.lang.String::hashCode (55 bytes)",
            "Deoptimization events (10 events):",
            "Event: 0.513 Thread 0x1 Uncommon trap: reason=unstable_if",
        ]);
        assert_eq!(model.vm_events.len(), 2);
        assert!(model.vm_events[0].contains("hashCode"));
        assert!(model.vm_events[1].contains("Uncommon trap"));
    }

    #[test]
    fn test_java_thread_count() {
        let model = fold_lines(&[
            "Java Threads: ( => current thread )",
            "  0x00007f8c80013000 JavaThread \"main\" [_thread_in_native, id=1]",
            "  0x00007f8c80014000 JavaThread \"Finalizer\" daemon [_thread_blocked, id=2]",
            "Other Threads:",
            "  0x00007f8c80015000 VMThread \"VM Thread\" [stack: 0x0,0x0] [id=3]",
        ]);
        assert_eq!(model.java_thread_count, 2);
        assert_eq!(model.thread_lines.len(), 3);
    }

    #[test]
    fn test_fold_of_empty_input() {
        let model = fold(Vec::<Record>::new());
        assert_eq!(model.record_count, 0);
        assert!(!model.has_usable_data());
    }

    #[test]
    fn test_direct_record_fold() {
        // fold() accepts records however they were produced
        let records = vec![
            construct(RecordKind::JavaCommand, "java_command: com.example.Main --serve"),
            construct(RecordKind::Host, "Host: build-host-17"),
        ];
        let model = fold(records);
        assert_eq!(model.java_command.as_deref(), Some("com.example.Main --serve"));
        assert_eq!(model.host.as_deref(), Some("build-host-17"));
    }
}
