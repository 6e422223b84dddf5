use crate::*;

/// A session wired to a persistence port.
///
/// Every move that changes the board is written to the store right away, so a
/// host can reload the game after a restart. Storage failures do not interrupt
/// play: they are logged and the in-memory session stays authoritative.
#[derive(Debug)]
pub struct Game<S> {
    store: S,
    session: Option<GameSession>,
}

impl<S: SnapshotStore> Game<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn start_default_game(&mut self) -> &GameSession {
        self.start_with_generator(GameConfig::DEFAULT, RandomMineGenerator::from_entropy())
    }

    pub fn start_new_game(&mut self, config: GameConfig) -> Result<&GameSession> {
        config.validate()?;
        Ok(self.start_with_generator(config, RandomMineGenerator::from_entropy()))
    }

    /// Replaces any running session wholesale.
    pub fn start_with_generator(
        &mut self,
        config: GameConfig,
        generator: impl MineGenerator,
    ) -> &GameSession {
        let session = self.session.insert(GameSession::initialize(config, generator));
        if let Err(err) = self.store.save(&session.snapshot()) {
            log::warn!("Failed to save new game: {err}");
        }
        session
    }

    /// Loads the stored game, if any.
    ///
    /// Returns `Ok(false)` and keeps the current session when nothing is stored.
    /// A corrupt record is reported and also leaves the current session alone,
    /// the caller decides whether to start fresh.
    pub fn load_state(&mut self) -> core::result::Result<bool, StoreError> {
        let Some(state) = self.store.load().inspect_err(|err| {
            log::warn!("Discarding unreadable saved game: {err}");
        })?
        else {
            return Ok(false);
        };

        let session = GameSession::restore(state).inspect_err(|err| {
            log::warn!("Discarding inconsistent saved game: {err}");
        })?;
        log::info!(
            "Loaded {}x{} game in phase {:?}",
            session.rows(),
            session.cols(),
            session.phase()
        );
        self.session = Some(session);
        Ok(true)
    }

    pub fn save(&mut self) -> core::result::Result<(), StoreError> {
        match &self.session {
            Some(session) => self.store.save(&session.snapshot()),
            None => Ok(()),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(session) = self.session.as_mut() else {
            return RevealOutcome::NoChange;
        };
        let outcome = session.reveal(coords);
        if outcome.has_update() {
            self.autosave();
        }
        outcome
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        let Some(session) = self.session.as_mut() else {
            return FlagOutcome::NoChange;
        };
        let outcome = session.toggle_flag(coords);
        if outcome.has_update() {
            self.autosave();
        }
        outcome
    }

    fn autosave(&mut self) {
        if let Err(err) = self.save() {
            log::warn!("Failed to save game: {err}");
        }
    }
}
