/// Contadores do PMM.
///
/// `used_frames` é mantido junto com o bitmap; `free = total - used`
/// por construção.
#[derive(Debug, Default, Clone, Copy)]
pub struct PmmStats {
    pub total_frames: usize,
    pub used_frames: usize,
    pub failed_allocs: usize,
    pub total_allocs: u64,
    pub total_frees: u64,
}

impl PmmStats {
    pub const fn new(total_frames: usize) -> Self {
        Self {
            total_frames,
            used_frames: 0,
            failed_allocs: 0,
            total_allocs: 0,
            total_frees: 0,
        }
    }

    pub fn inc_alloc(&mut self) {
        self.used_frames += 1;
        self.total_allocs += 1;
    }

    pub fn inc_free(&mut self) {
        self.used_frames -= 1;
        self.total_frees += 1;
    }

    pub fn inc_failed(&mut self) {
        self.failed_allocs += 1;
    }

    pub fn free_frames(&self) -> usize {
        self.total_frames - self.used_frames
    }
}
