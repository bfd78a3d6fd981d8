//! Round-robin shell casing pool

use std::collections::VecDeque;

use armory_core::Transform;
use glam::Vec3;

use crate::hooks::{ShellHandle, ShellPool};

/// Where and how hard a shell was last thrown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellLaunch {
    pub pose: Transform,
    pub impulse: Vec3,
}

/// A fixed number of shells reused oldest-first. The host reads each shell's
/// last launch to place and push its physics body.
#[derive(Debug, Clone)]
pub struct ShellRing {
    queue: VecDeque<ShellHandle>,
    launches: Vec<Option<ShellLaunch>>,
}

impl ShellRing {
    /// Create a ring of `size` shells (at least one)
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            queue: (0..size).map(ShellHandle).collect(),
            launches: vec![None; size],
        }
    }

    pub fn len(&self) -> usize {
        self.launches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.launches.is_empty()
    }

    /// Last launch of `shell`, or `None` if it is still inactive
    pub fn launch_of(&self, shell: ShellHandle) -> Option<ShellLaunch> {
        self.launches.get(shell.0).copied().flatten()
    }

    /// Number of shells that have been launched at least once
    pub fn active_count(&self) -> usize {
        self.launches.iter().filter(|l| l.is_some()).count()
    }
}

impl ShellPool for ShellRing {
    fn next(&mut self) -> ShellHandle {
        // The ring is never empty, so rotation always yields a shell
        match self.queue.pop_front() {
            Some(shell) => {
                self.queue.push_back(shell);
                shell
            }
            None => ShellHandle(0),
        }
    }

    fn launch(&mut self, shell: ShellHandle, pose: Transform, impulse: Vec3) {
        if let Some(slot) = self.launches.get_mut(shell.0) {
            *slot = Some(ShellLaunch { pose, impulse });
        }
    }
}
