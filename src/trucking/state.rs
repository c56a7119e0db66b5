/// Semi Trucker player state definitions.

use std::collections::BTreeMap;
use std::fmt;

use super::error::JobError;

/// Businesses the player can run, ordered by progression tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Business {
    HotDog,
    Newspaper,
    Packages,
    InterState,
    Explosives,
    Chemicals,
    Military,
}

pub const BUSINESS_COUNT: usize = 7;

impl Business {
    /// All businesses in display order.
    pub const ALL: [Business; BUSINESS_COUNT] = [
        Business::HotDog,
        Business::Newspaper,
        Business::Packages,
        Business::InterState,
        Business::Explosives,
        Business::Chemicals,
        Business::Military,
    ];

    /// Tier index, also used as the persisted id.
    pub fn index(self) -> usize {
        match self {
            Business::HotDog => 0,
            Business::Newspaper => 1,
            Business::Packages => 2,
            Business::InterState => 3,
            Business::Explosives => 4,
            Business::Chemicals => 5,
            Business::Military => 6,
        }
    }

    pub fn from_index(idx: u8) -> Result<Business, JobError> {
        Business::ALL
            .get(idx as usize)
            .copied()
            .ok_or(JobError::UnknownJob(idx))
    }

    pub fn name(self) -> &'static str {
        match self {
            Business::HotDog => "Hot Dogs",
            Business::Newspaper => "Newspapers",
            Business::Packages => "Packages",
            Business::InterState => "Inter-State",
            Business::Explosives => "Explosives",
            Business::Chemicals => "Chemicals",
            Business::Military => "Military",
        }
    }
}

impl fmt::Display for Business {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-business progress owned by the player.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobStats {
    /// Units owned.
    pub amount: u32,
    /// Automated: restarts itself after every completed cycle.
    pub managed: bool,
    /// Milliseconds left in the running cycle. `None` while idle.
    pub time: Option<u64>,
}

impl JobStats {
    /// A stored zero is left over from an interrupted cycle and counts as idle.
    pub fn is_running(&self) -> bool {
        matches!(self.time, Some(t) if t > 0)
    }
}

/// Log entry shown in the activity panel.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

const MAX_LOG: usize = 50;

/// Root aggregate persisted between sessions.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerData {
    /// Balance in cents.
    pub money: u64,
    /// Wall-clock ms of the last save, used for offline catch-up.
    pub last_time: u64,
    /// Only businesses the player has interacted with are present.
    pub jobs: BTreeMap<Business, JobStats>,
}

impl PlayerData {
    /// A brand new player: no money and a single hot dog stand.
    pub fn new_player(now_ms: u64) -> Self {
        let mut jobs = BTreeMap::new();
        jobs.insert(
            Business::HotDog,
            JobStats {
                amount: 1,
                managed: false,
                time: None,
            },
        );
        Self {
            money: 0,
            last_time: now_ms,
            jobs,
        }
    }

    pub fn amount_of(&self, id: Business) -> u32 {
        self.jobs.get(&id).map_or(0, |s| s.amount)
    }
}

/// Transient UI state that never reaches storage.
pub struct TruckingState {
    pub data: PlayerData,
    pub log: Vec<LogEntry>,
    /// Business whose buy button was pressed last, for the press highlight.
    pub last_click: Option<Business>,
    /// Frames left on the payout flash.
    pub payout_flash: u32,
}

impl TruckingState {
    pub fn new(data: PlayerData) -> Self {
        Self {
            data,
            log: vec![LogEntry {
                text: "Welcome to Semi Trucker!".into(),
                is_important: true,
            }],
            last_click: None,
            payout_flash: 0,
        }
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_owns_one_hot_dog_stand() {
        let data = PlayerData::new_player(1_000);
        assert_eq!(data.money, 0);
        assert_eq!(data.last_time, 1_000);
        assert_eq!(data.jobs.len(), 1);
        let stand = &data.jobs[&Business::HotDog];
        assert_eq!(stand.amount, 1);
        assert!(!stand.managed);
        assert_eq!(stand.time, None);
    }

    #[test]
    fn index_roundtrips_through_from_index() {
        for b in Business::ALL {
            assert_eq!(Business::from_index(b.index() as u8).unwrap(), b);
        }
    }

    #[test]
    fn unknown_index_is_rejected() {
        assert_eq!(Business::from_index(7), Err(JobError::UnknownJob(7)));
        assert_eq!(Business::from_index(255), Err(JobError::UnknownJob(255)));
    }

    #[test]
    fn zero_time_counts_as_idle() {
        let mut stats = JobStats::default();
        assert!(!stats.is_running());
        stats.time = Some(0);
        assert!(!stats.is_running());
        stats.time = Some(1);
        assert!(stats.is_running());
    }

    #[test]
    fn amount_of_missing_business_is_zero() {
        let data = PlayerData::new_player(0);
        assert_eq!(data.amount_of(Business::HotDog), 1);
        assert_eq!(data.amount_of(Business::Military), 0);
    }

    #[test]
    fn log_truncation() {
        let mut state = TruckingState::new(PlayerData::new_player(0));
        for i in 0..60 {
            state.add_log(&format!("msg {}", i), false);
        }
        assert_eq!(state.log.len(), MAX_LOG);
        assert_eq!(state.log.last().unwrap().text, "msg 59");
    }
}
