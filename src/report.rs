//! Relatórios de diagnóstico do binário (tabela de tasks, mapa de memória,
//! heap). Só formatação: os dados vêm dos acessores do núcleo.

use forge_sim::mm::heap::HeapAllocator;
use forge_sim::mm::vmm::MemoryManager;
use forge_sim::sched::scheduler::Scheduler;

pub fn task_table(sched: &Scheduler) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== TASKS (política={}, tick={}, prontas={}) ===\n",
        sched.policy(),
        sched.ticks(),
        sched.ready_count()
    ));
    out.push_str(&format!(
        "{:>4}  {:<12} {:<10} {:<8} {:>6} {:>5} {:>5}\n",
        "TID", "NOME", "ESTADO", "PRIO", "CPU", "VOL", "INV"
    ));
    for task in sched.tasks() {
        let marker = if sched.current_tid() == Some(task.tid) { '*' } else { ' ' };
        out.push_str(&format!(
            "{:>3}{} {:<12} {:<10} {:<8} {:>6} {:>5} {:>5}\n",
            task.tid.as_u32(),
            marker,
            task.name,
            task.state,
            task.priority,
            task.cpu_time(),
            task.accounting.voluntary_switches,
            task.accounting.involuntary_switches
        ));
    }
    out
}

pub fn memory_map(mm: &MemoryManager) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== MEMÓRIA (frames: {} usados / {} livres / {} total, faults={}) ===\n",
        mm.used_frame_count(),
        mm.free_frame_count(),
        mm.total_frames(),
        mm.page_fault_count()
    ));
    for tid in mm.address_spaces() {
        let Some(table) = mm.page_table(tid) else { continue };
        out.push_str(&format!(
            "task {}: {} KiB\n",
            table.owner(),
            mm.task_memory_usage(tid) / 1024
        ));
        for (page, entry) in table.entries() {
            out.push_str(&format!(
                "  página {:>5} -> frame {:>5} @ {:#010x} [{:?}]{}{}\n",
                page.as_u32(),
                entry.frame.number().as_u32(),
                entry.frame.start_address(),
                entry.protection,
                if entry.accessed { " A" } else { "" },
                if entry.dirty { " D" } else { "" }
            ));
        }
    }
    out
}

pub fn heap_report(heap: &HeapAllocator) -> String {
    format!(
        "=== HEAP ===\n\
         total: {} bytes\n\
         usado: {} bytes ({:.2}%)\n\
         livre: {} bytes\n\
         blocos: {} ({} livres, maior livre {} bytes)\n",
        heap.total_bytes(),
        heap.used_bytes(),
        heap.utilization(),
        heap.free_bytes(),
        heap.block_count(),
        heap.free_block_count(),
        heap.largest_free_block()
    )
}
