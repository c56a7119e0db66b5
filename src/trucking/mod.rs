//! Semi Trucker: run deliveries, buy trucks and hire drivers to automate routes.

pub mod actions;
pub mod catalog;
pub mod error;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

#[cfg(test)]
mod simulator;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::time::JobClock;

use actions::*;
use catalog::Catalog;
use error::JobResult;
use state::{Business, PlayerData, TruckingState, BUSINESS_COUNT};

/// Frames the balance stays highlighted after a payout.
const PAYOUT_FLASH_FRAMES: u32 = 20;

/// What the player asked for, after key/click decoding.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Order {
    Run(Business),
    Buy(Business),
    Automate(Business),
}

impl Order {
    fn from_key(key: char) -> Option<Order> {
        let find = |keys: &[char; BUSINESS_COUNT]| keys.iter().position(|&k| k == key);
        if let Some(i) = find(&RUN_KEYS) {
            Some(Order::Run(Business::ALL[i]))
        } else if let Some(i) = find(&BUY_KEYS) {
            Some(Order::Buy(Business::ALL[i]))
        } else {
            find(&AUTO_KEYS).map(|i| Order::Automate(Business::ALL[i]))
        }
    }

    fn from_click(action_id: u16) -> Option<Order> {
        let business = |base: u16| Business::from_index((action_id - base) as u8).ok();
        let span = BUSINESS_COUNT as u16;
        match action_id {
            id if (RUN_BASE..RUN_BASE + span).contains(&id) => business(RUN_BASE).map(Order::Run),
            id if (BUY_BASE..BUY_BASE + span).contains(&id) => business(BUY_BASE).map(Order::Buy),
            id if (AUTO_BASE..AUTO_BASE + span).contains(&id) => {
                business(AUTO_BASE).map(Order::Automate)
            }
            _ => None,
        }
    }
}

pub struct TruckingGame {
    pub state: TruckingState,
    pub catalog: Catalog,
    clock: JobClock,
}

impl TruckingGame {
    /// Load the stored player (or start fresh) and settle the time spent away.
    pub fn new(now_ms: u64) -> Self {
        let catalog = Catalog::default();

        #[cfg(target_arch = "wasm32")]
        let (data, loaded) = save::load_game(now_ms);
        #[cfg(not(target_arch = "wasm32"))]
        let (data, loaded) = (PlayerData::new_player(now_ms), false);

        Self::resume(data, catalog, now_ms, loaded)
    }

    /// Put automated routes back on the road and credit the time spent away.
    fn resume(mut data: PlayerData, catalog: Catalog, now_ms: u64, loaded: bool) -> Self {
        logic::resume_automated(&mut data, &catalog);

        let mut game = Self::with_data(data, catalog);
        if loaded {
            game.state.add_log("Save data loaded.", false);
        }
        let earned = logic::sync_elapsed(&mut game.state.data, &game.catalog, now_ms);
        if earned > 0 {
            game.state.add_log(
                &format!("While you were away: +${}", logic::format_money(earned)),
                true,
            );
        }

        #[cfg(target_arch = "wasm32")]
        save::save_game(&mut game.state.data, now_ms);

        game
    }

    pub fn with_data(data: PlayerData, catalog: Catalog) -> Self {
        Self {
            state: TruckingState::new(data),
            catalog,
            clock: JobClock::default(),
        }
    }

    /// Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let order = match event {
            InputEvent::Key(c) => Order::from_key(c.to_ascii_lowercase()),
            InputEvent::Click(id) => Order::from_click(*id),
        };
        let Some(order) = order else {
            return false;
        };
        match self.execute(order) {
            Ok(()) => {
                #[cfg(target_arch = "wasm32")]
                save::save_game(&mut self.state.data, crate::time::wall_clock_ms());
            }
            Err(e) => self.state.add_log(&e.to_string(), false),
        }
        true
    }

    fn execute(&mut self, order: Order) -> JobResult<()> {
        let data = &mut self.state.data;
        match order {
            Order::Run(id) => logic::start_job(data, &self.catalog, id),
            Order::Buy(id) => {
                self.state.last_click = Some(id);
                let paid = logic::purchase(data, &self.catalog, id)?;
                let owned = data.amount_of(id);
                self.state.add_log(
                    &format!("Bought {} #{} for ${}", id, owned, logic::format_money(paid)),
                    false,
                );
                Ok(())
            }
            Order::Automate(id) => {
                logic::automate(data, &self.catalog, id)?;
                self.state
                    .add_log(&format!("Hired a driver for {}!", id), true);
                Ok(())
            }
        }
    }

    /// Advance by one draw frame. `now_ms` is a monotonic frame timestamp.
    pub fn frame(&mut self, now_ms: f64) {
        self.state.payout_flash = self.state.payout_flash.saturating_sub(1);

        let step = self.clock.update(now_ms);
        if let Some(delta) = step.job_delta_ms {
            self.settle(delta);
        }
        if step.save_due {
            #[cfg(target_arch = "wasm32")]
            save::save_game(&mut self.state.data, crate::time::wall_clock_ms());
        }
    }

    /// Run the accounting tick and report manual routes that came home.
    fn settle(&mut self, delta_ms: u64) {
        let on_road: Vec<Business> = self
            .state
            .data
            .jobs
            .iter()
            .filter(|(_, s)| !s.managed && s.time.is_some())
            .map(|(&id, _)| id)
            .collect();

        let earned = logic::tick(&mut self.state.data, &self.catalog, delta_ms);
        if earned == 0 {
            return;
        }
        self.state.payout_flash = PAYOUT_FLASH_FRAMES;
        for id in on_road {
            if self.state.data.jobs.get(&id).is_some_and(|s| s.time.is_none()) {
                self.state.add_log(&format!("{} delivery complete.", id), false);
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, &self.catalog, f, area, click_state);
    }
}
