use std::{fmt, time::Duration};

use crate::{
    archive::{Archive, TransferError},
    transfer::{conclude, Transfer},
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AchievementProgress {
    pub id: u32,
    pub count: u32,
    /// Zero while incomplete
    pub completed_at: Duration,
}

impl AchievementProgress {
    pub fn is_complete(&self) -> bool {
        !self.completed_at.is_zero()
    }
}

impl Transfer for AchievementProgress {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("id", &mut self.id);
        success &= archive.transfer("count", &mut self.count);
        success &= archive.transfer("completed_at", &mut self.completed_at);
        conclude(success, "AchievementProgress")
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AchievementState {
    entries: Vec<AchievementProgress>,
}

impl AchievementState {
    pub fn progress(&self, id: u32) -> Option<&AchievementProgress> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn set_progress(&mut self, id: u32, count: u32, completed_at: Duration) {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.count = count;
                entry.completed_at = completed_at;
            }
            None => self.entries.push(AchievementProgress {
                id,
                count,
                completed_at,
            }),
        }
    }

    pub fn entries(&self) -> &[AchievementProgress] {
        &self.entries
    }
}

impl Transfer for AchievementState {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let success = archive.transfer("entries", &mut self.entries);
        conclude(success, "AchievementState")
    }
}

impl fmt::Display for AchievementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let completed = self.entries.iter().filter(|entry| entry.is_complete()).count();
        write!(f, "{} tracked, {} complete", self.entries.len(), completed)
    }
}
