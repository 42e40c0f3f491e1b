//! The pet: every piece of state wired to one store and one clock.
//!
//! [`Pet`] is the single entry point front ends talk to. Each operation
//! first catches decay up to "now", then applies its own change, checks
//! achievements, and saves whatever it touched. Problems the owner should
//! know about but can't act on (storage failures, unlocks) are queued as
//! [`Notice`]s rather than returned as errors.

use pixelpaws_logic::actions::ActionKind;
use pixelpaws_logic::config::PetConfig;
use pixelpaws_logic::constants::EXPORT_VERSION;
use pixelpaws_logic::customization::{CustomizationPatch, Feature};
use pixelpaws_logic::decay::DecayOutcome;
use pixelpaws_logic::health::{ActionOutcome, StatusChange};
use pixelpaws_logic::loyalty::{Theme, VisitOutcome};
use pixelpaws_logic::mood::{default_weather, Weather};
use pixelpaws_logic::report::{build_report, HealthReport};
use pixelpaws_logic::shop::{self, check_purchase, ShopItem};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::achievement_book::AchievementBook;
use crate::appearance::Appearance;
use crate::backup::{parse_export, ExportedHealth, PetExport};
use crate::calendar::LoyaltyCalendar;
use crate::clock::{day_index, local_hour, rfc3339, Clock};
use crate::error::PetResult;
use crate::inventory::Inventory;
use crate::notice::{Notice, Notices};
use crate::store::KeyValueStore;
use crate::tracker::HealthTracker;

pub struct Pet<S, C> {
    store: S,
    clock: C,
    config: PetConfig,
    tracker: HealthTracker,
    inventory: Inventory,
    achievements: AchievementBook,
    calendar: LoyaltyCalendar,
    appearance: Appearance,
    /// Owner-chosen weather; `None` follows the time of day.
    weather: Option<Weather>,
    notices: Notices,
    rng: StdRng,
}

impl<S: KeyValueStore, C: Clock> Pet<S, C> {
    /// Load everything from `store`, count today's visit, and catch up on
    /// the time the pet was away.
    pub fn open(mut store: S, clock: C, config: PetConfig) -> Self {
        let mut notices = Notices::new();
        let now = clock.now_ms();

        let tracker = HealthTracker::load_state(&mut store, &config, now, &mut notices);
        let inventory = Inventory::load(&store, &mut notices);
        let achievements = AchievementBook::load(&store, &mut notices);
        let today = day_index(now, config.utc_offset_minutes);
        let (calendar, visit) = LoyaltyCalendar::open(&store, today, &mut notices);
        let appearance = Appearance::load(&store, &mut notices);

        let mut pet = Self {
            store,
            clock,
            config,
            tracker,
            inventory,
            achievements,
            calendar,
            appearance,
            weather: None,
            notices,
            rng: StdRng::from_entropy(),
        };
        pet.on_visit(visit);
        pet.catch_up(now);
        pet.tracker.mark_active();
        pet.check_achievements(now);
        pet.persist_all();
        log::info!(
            "Pet opened: {} at {:.0}% (visit day {})",
            pet.tracker.status().as_str(),
            pet.tracker.percentage(),
            pet.calendar.visit_days()
        );
        pet
    }

    /// Replace the speech-line RNG with a seeded one.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn health(&self) -> &HealthTracker {
        &self.tracker
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn achievements(&self) -> &AchievementBook {
        &self.achievements
    }

    pub fn calendar(&self) -> &LoyaltyCalendar {
        &self.calendar
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn config(&self) -> &PetConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    // ── Time ────────────────────────────────────────────────────────────

    /// Periodic update: decay, plus a new loyalty day if the calendar
    /// rolled over while the pet was open. Ticking is not owner activity,
    /// so an idle open pet decays exactly like an absent one.
    pub fn tick(&mut self) -> Option<DecayOutcome> {
        let now = self.clock.now_ms();
        let visit = self
            .calendar
            .register_visit(day_index(now, self.config.utc_offset_minutes));
        if visit.new_day {
            self.on_visit(visit);
            self.calendar.persist(&mut self.store, &mut self.notices);
            if self.check_achievements(now) {
                self.achievements.persist(&mut self.store, &mut self.notices);
            }
        }

        let outcome = self.catch_up(now);
        if outcome.is_some() {
            self.tracker.persist(&mut self.store, &mut self.notices);
        }
        outcome
    }

    fn catch_up(&mut self, now: i64) -> Option<DecayOutcome> {
        let outcome = self.tracker.apply_elapsed_decay(now)?;
        if let Some(change) = outcome.status_change {
            self.announce(change);
        }
        Some(outcome)
    }

    fn on_visit(&mut self, visit: VisitOutcome) {
        if let Some(theme) = visit.unlocked {
            self.notices.celebrate(format!(
                "Visit day {}! The {} theme is unlocked.",
                visit.visit_days, theme.name
            ));
        }
        if visit.reached_returning_day() && self.achievements.mark_returned() {
            log::info!("Owner returned on loyalty day {}", visit.visit_days);
        }
    }

    fn announce(&mut self, change: StatusChange) {
        if change.is_promotion() {
            self.notices.celebrate(format!(
                "Your pet is feeling better: now {}!",
                change.to.label()
            ));
        } else {
            self.notices.warn(format!(
                "Your pet is now {} and needs some care.",
                change.to.label()
            ));
        }
    }

    /// Returns true if anything new was unlocked.
    fn check_achievements(&mut self, now: i64) -> bool {
        let fresh = self.achievements.check_all(self.inventory.owned().len(), now);
        for id in &fresh {
            self.notices
                .celebrate(format!("Achievement unlocked: {}!", id.name()));
        }
        !fresh.is_empty()
    }

    // ── Care ────────────────────────────────────────────────────────────

    pub fn perform(&mut self, action: ActionKind) -> ActionOutcome {
        let now = self.clock.now_ms();
        self.catch_up(now);
        self.tracker.mark_active();

        let outcome = self.tracker.perform_action(action);
        if let Some(change) = outcome.status_change {
            self.announce(change);
        }
        self.achievements.mark_played();
        self.check_achievements(now);

        self.tracker.persist(&mut self.store, &mut self.notices);
        self.achievements.persist(&mut self.store, &mut self.notices);
        outcome
    }

    /// [`Pet::perform`] by action name, e.g. `"feed"` or `"play"`.
    pub fn perform_str(&mut self, name: &str) -> PetResult<ActionOutcome> {
        let action: ActionKind = name.parse()?;
        Ok(self.perform(action))
    }

    // ── Shop ────────────────────────────────────────────────────────────

    pub fn is_shop_open(&self) -> bool {
        shop::is_open(self.tracker.happiness(), &self.config.shop)
    }

    /// Buy an accessory with happiness. The item is equipped right away.
    pub fn purchase(&mut self, id: &str) -> PetResult<&'static ShopItem> {
        let now = self.clock.now_ms();
        self.catch_up(now);
        self.tracker.mark_active();

        let item = match check_purchase(
            id,
            self.tracker.happiness(),
            self.inventory.owned(),
            &self.config.shop,
        ) {
            Ok(item) => item,
            Err(rejection) => {
                // Decay may still have moved
                self.tracker.persist(&mut self.store, &mut self.notices);
                return Err(rejection.into());
            }
        };

        if let Some(change) = self.tracker.spend_happiness(item.cost) {
            self.announce(change);
        }
        self.inventory.add_and_equip(item.id);
        self.check_achievements(now);
        log::info!("Purchased {} for {}", item.id, item.cost);
        self.notices.info(format!("You bought the {}!", item.name));

        self.tracker.persist(&mut self.store, &mut self.notices);
        self.inventory.persist(&mut self.store, &mut self.notices);
        self.achievements.persist(&mut self.store, &mut self.notices);
        Ok(item)
    }

    /// Returns whether the item is now equipped.
    pub fn toggle_equip(&mut self, id: &str) -> PetResult<bool> {
        let equipped = self.inventory.toggle_equip(id)?;
        self.inventory.persist(&mut self.store, &mut self.notices);
        Ok(equipped)
    }

    // ── Appearance ──────────────────────────────────────────────────────

    /// Step a feature to its next (or previous) option. Returns the new
    /// value.
    pub fn cycle_feature(&mut self, feature: Feature, forward: bool) -> &'static str {
        let value = self.appearance.cycle(feature, forward);
        self.appearance.persist(&mut self.store, &mut self.notices);
        value
    }

    /// [`Pet::cycle_feature`] by feature name, e.g. `"ears"`.
    pub fn cycle_feature_str(&mut self, name: &str, forward: bool) -> PetResult<&'static str> {
        let feature: Feature = name.parse()?;
        Ok(self.cycle_feature(feature, forward))
    }

    pub fn rename(&mut self, name: &str) {
        self.appearance.rename(name);
        log::info!("Pet renamed to {}", self.appearance.name());
        self.appearance.persist(&mut self.store, &mut self.notices);
    }

    // ── Themes and weather ──────────────────────────────────────────────

    pub fn select_theme(&mut self, key: &str) -> PetResult<&'static Theme> {
        let theme = self.calendar.select(key)?;
        self.calendar.persist(&mut self.store, &mut self.notices);
        Ok(theme)
    }

    pub fn set_weather(&mut self, weather: Option<Weather>) {
        self.weather = weather;
    }

    /// `"auto"` goes back to following the time of day.
    pub fn set_weather_str(&mut self, name: &str) -> PetResult<Option<Weather>> {
        let weather = if name.eq_ignore_ascii_case("auto") {
            None
        } else {
            Some(name.parse::<Weather>()?)
        };
        self.weather = weather;
        Ok(weather)
    }

    pub fn weather(&self) -> Weather {
        self.weather.unwrap_or_else(|| {
            default_weather(local_hour(
                self.clock.now_ms(),
                self.config.utc_offset_minutes,
            ))
        })
    }

    pub fn report(&mut self) -> HealthReport {
        let weather = self.weather();
        build_report(
            self.tracker.state(),
            self.tracker.thresholds(),
            weather,
            &mut self.rng,
        )
    }

    // ── Backup ──────────────────────────────────────────────────────────

    pub fn export(&self) -> PetResult<String> {
        let state = self.tracker.state();
        let export = PetExport {
            version: EXPORT_VERSION.to_string(),
            export_date: rfc3339(self.clock.now_ms()),
            customization: CustomizationPatch::from(self.appearance.look()),
            owned_items: self.inventory.owned().to_vec(),
            equipped_items: self.inventory.equipped().to_vec(),
            health: Some(ExportedHealth {
                hunger: state.hunger,
                happiness: state.happiness,
                status: Some(state.status),
            }),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Merge the exported look, and replace inventory (and health, if
    /// present) with an exported document. Nothing changes if the document
    /// is rejected.
    pub fn import(&mut self, raw: &str) -> PetResult<()> {
        let export = parse_export(raw)?;
        let now = self.clock.now_ms();
        self.catch_up(now);
        self.tracker.mark_active();

        self.appearance.apply(export.customization);
        self.inventory = Inventory::from_lists(export.owned_items, export.equipped_items);
        if let Some(health) = export.health {
            self.tracker.restore(health.hunger, health.happiness);
        }
        self.check_achievements(now);
        log::info!(
            "Imported pet data version {} ({} items)",
            export.version,
            self.inventory.owned().len()
        );
        self.notices.info(format!(
            "Pet data imported. Welcome back, {}!",
            self.appearance.name()
        ));
        self.persist_all();
        Ok(())
    }

    // ── Resets ──────────────────────────────────────────────────────────

    pub fn reset_health(&mut self) {
        self.tracker.reset(self.clock.now_ms());
        self.tracker.persist(&mut self.store, &mut self.notices);
        self.notices.info("Your pet is back to full health.");
    }

    /// Start over: health, appearance, accessories, achievements, and the
    /// loyalty calendar.
    pub fn reset_all(&mut self) {
        let now = self.clock.now_ms();
        log::info!("Resetting all pet data");
        self.tracker.reset(now);
        self.appearance.reset();
        self.inventory.clear();
        self.achievements.clear();
        self.calendar
            .reset(day_index(now, self.config.utc_offset_minutes));
        self.weather = None;
        self.persist_all();
        self.notices.info("All pet data has been reset.");
    }

    fn persist_all(&mut self) {
        self.tracker.persist(&mut self.store, &mut self.notices);
        self.inventory.persist(&mut self.store, &mut self.notices);
        self.achievements.persist(&mut self.store, &mut self.notices);
        self.calendar.persist(&mut self.store, &mut self.notices);
        self.appearance.persist(&mut self.store, &mut self.notices);
    }
}
