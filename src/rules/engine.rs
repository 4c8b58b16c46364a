//! The round state machine.
//!
//! `transition` is a pure function from (state, intent, time) to the next
//! state. Intents whose preconditions don't hold are ignored and the prior
//! state comes back unchanged; `try_transition` reports why.
//!
//! ## Lifecycle
//!
//! - `InitGame` moves any status to in-game
//! - A game finishes when exactly one team reaches the target score
//! - Two or more teams reaching it together start a tiebreak all-in round
//! - `Rehydrate` and `Reset` replace the state wholesale
//!
//! Everything else only applies while the game is in progress.

use smallvec::{smallvec, SmallVec};
use tracing::{debug, info, trace};

use super::rotation::advance_clockwise;
use super::scoring::{leading_teams, score_round, RoundOutcome, TeamScore};
use crate::cards::{Category, DieFace};
use crate::core::{
    Action, EventKind, GameState, GameStatus, InitGame, PenaltyEvent, PenaltyKind, PlayerId,
    ResolvedCard, ResolvedVia, RoundMode, RoundState, TeamId, Timestamp,
};
use crate::error::IgnoredIntent;

type Step = Result<(), IgnoredIntent>;

/// Apply an intent, or return the prior state if it doesn't apply.
#[must_use]
pub fn transition(state: &GameState, action: &Action, now: Timestamp) -> GameState {
    match try_transition(state, action, now) {
        Ok(next) => next,
        Err(reason) => {
            debug!(intent = action.name(), %reason, "intent ignored");
            state.clone()
        }
    }
}

/// Apply an intent, reporting why it was ignored.
pub fn try_transition(
    state: &GameState,
    action: &Action,
    now: Timestamp,
) -> Result<GameState, IgnoredIntent> {
    if !action.ignores_status() && !state.is_in_game() {
        return Err(IgnoredIntent::NotInGame);
    }

    let mut next = state.clone();
    apply(&mut next, action, now)?;
    Ok(next)
}

fn apply(state: &mut GameState, action: &Action, now: Timestamp) -> Step {
    match action {
        Action::InitGame(init) => {
            init_game(state, init);
            Ok(())
        }
        Action::AssignFirstClueGiver { team_id, player_id } => {
            assign_first_clue_giver(state, team_id, player_id)
        }
        Action::StartRound => {
            start_round(state, now);
            Ok(())
        }
        Action::RollDie { face } => {
            roll_die(state, *face, now);
            Ok(())
        }
        Action::SetAllInCategory { category } => set_all_in_category(state, *category),
        Action::DrawNextCard => draw_next_card(state, now),
        Action::MarkCorrect { team_ids } => mark_correct(state, team_ids, now),
        Action::MarkPass => mark_pass(state, now),
        Action::ApplyPenalty {
            kind,
            source_team_id,
        } => apply_penalty(state, *kind, source_team_id.as_ref(), now),
        Action::ActivateUncuff => activate_uncuff(state),
        Action::RequestStealLock { team_id } => request_steal_lock(state, team_id, now),
        Action::ResolveSteal { correct } => resolve_steal(state, *correct, now),
        Action::MarkDeadCard => mark_dead_card(state),
        Action::StartTimer => start_timer(state),
        Action::TimerTick { seconds } => timer_tick(state, *seconds),
        Action::EndRoundAndScore => {
            end_round_and_score(state, now);
            Ok(())
        }
        Action::CheckWinOrTiebreak => check_win_or_tiebreak(state, now),
        Action::StartTiebreakAllIn => {
            start_tiebreak(state, now);
            Ok(())
        }
        Action::ResolveTiebreak { winner_team_id } => {
            resolve_tiebreak(state, winner_team_id.as_ref(), now)
        }
        Action::AdvanceToNextTeam => {
            advance_to_next_team(state);
            Ok(())
        }
        Action::Rehydrate(snapshot) => {
            info!(status = ?snapshot.status, "state rehydrated");
            *state = (**snapshot).clone();
            Ok(())
        }
        Action::Reset => {
            *state = GameState::empty();
            Ok(())
        }
    }
}

/// Enumerate intents that would currently change the state.
///
/// Parameterised intents are expanded over teams, faces, categories and
/// penalty kinds. `InitGame` and `Rehydrate` carry payloads a host has to
/// supply and are never listed. In all-in rounds `MarkCorrect` is listed
/// once per team.
#[must_use]
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    let mut candidates = Vec::new();

    if state.status != GameStatus::Setup {
        candidates.push(Action::Reset);
    }
    if !state.is_in_game() {
        return candidates;
    }

    if state.round.active_team_id.is_none() {
        for team in &state.teams {
            for player_id in &team.player_ids {
                candidates.push(Action::AssignFirstClueGiver {
                    team_id: team.id.clone(),
                    player_id: player_id.clone(),
                });
            }
        }
    }

    candidates.push(Action::StartRound);
    candidates.extend(DieFace::ALL.iter().map(|&face| Action::RollDie { face }));
    candidates.extend(Category::ALL.iter().map(|&category| Action::SetAllInCategory { category }));
    candidates.push(Action::DrawNextCard);

    if state.round.mode.is_all_in() {
        candidates.extend(state.teams.iter().map(|t| Action::MarkCorrect {
            team_ids: vec![t.id.clone()],
        }));
    } else {
        candidates.push(Action::MarkCorrect { team_ids: Vec::new() });
    }
    candidates.push(Action::MarkPass);
    candidates.extend(PenaltyKind::ALL.iter().map(|&kind| Action::ApplyPenalty {
        kind,
        source_team_id: None,
    }));
    candidates.push(Action::ActivateUncuff);
    candidates.extend(state.teams.iter().map(|t| Action::RequestStealLock {
        team_id: t.id.clone(),
    }));
    candidates.push(Action::ResolveSteal { correct: true });
    candidates.push(Action::ResolveSteal { correct: false });
    candidates.push(Action::MarkDeadCard);
    candidates.push(Action::StartTimer);
    candidates.push(Action::tick());
    candidates.push(Action::EndRoundAndScore);
    candidates.push(Action::CheckWinOrTiebreak);
    candidates.push(Action::StartTiebreakAllIn);
    candidates.push(Action::ResolveTiebreak { winner_team_id: None });
    candidates.extend(state.teams.iter().map(|t| Action::ResolveTiebreak {
        winner_team_id: Some(t.id.clone()),
    }));
    candidates.push(Action::AdvanceToNextTeam);

    // Time only stamps log entries; it never decides applicability.
    candidates
        .into_iter()
        .filter(|action| try_transition(state, action, Timestamp::default()).is_ok())
        .collect()
}

// === Setup ===

fn init_game(state: &mut GameState, init: &InitGame) {
    info!(
        teams = init.teams.len(),
        target_score = init.target_score,
        turn_seconds = init.settings.turn_seconds,
        "game initialized"
    );
    *state = GameState {
        teams: init.teams.iter().cloned().collect(),
        players: init.players.iter().cloned().collect(),
        target_score: init.target_score,
        settings: init.settings,
        round: RoundState::new(None, None, init.settings.turn_seconds),
        decks: init.decks.clone(),
        status: GameStatus::InGame,
        ..GameState::empty()
    };
}

fn assign_first_clue_giver(state: &mut GameState, team_id: &TeamId, player_id: &PlayerId) -> Step {
    let team = state.team(team_id).ok_or(IgnoredIntent::UnknownTeam)?;
    let chosen = team
        .player_ids
        .iter()
        .position(|p| p == player_id)
        .ok_or(IgnoredIntent::UnknownPlayer)?;

    state.update_team(team_id, |t| {
        t.next_player_index = (chosen + 1) % t.player_ids.len();
    });
    state.round = RoundState::new(
        Some(team_id.clone()),
        Some(player_id.clone()),
        state.settings.turn_seconds,
    );
    Ok(())
}

// === Round Flow ===

fn start_round(state: &mut GameState, now: Timestamp) {
    let mode = if state.round.mode == RoundMode::TiebreakAllIn {
        RoundMode::TiebreakAllIn
    } else {
        RoundMode::Normal
    };
    state.round = RoundState::fresh(
        mode,
        state.round.active_team_id.clone(),
        state.round.active_player_id.clone(),
        state.settings.turn_seconds,
    );

    let name = active_team_name(state);
    state.push_event(EventKind::RoundStarted, format!("Round started for {name}."), now);
}

fn roll_die(state: &mut GameState, face: DieFace, now: Timestamp) {
    let round = &mut state.round;
    round.mode = match (face.is_all_in(), round.mode) {
        (false, _) => RoundMode::Normal,
        (true, RoundMode::TiebreakAllIn) => RoundMode::TiebreakAllIn,
        (true, _) => RoundMode::AllIn,
    };
    round.die_face = face;
    round.chosen_category = face.category();
    round.clear_active_card();

    state.push_event(EventKind::DieRolled, format!("Die rolled: {face}."), now);
}

fn set_all_in_category(state: &mut GameState, category: Category) -> Step {
    let round = &mut state.round;
    if !round.mode.is_all_in() {
        return Err(IgnoredIntent::NotAllInMode);
    }
    if round.active_card_id.is_some() {
        return Err(IgnoredIntent::CardAlreadyActive);
    }
    if round.chosen_category == Some(category) {
        return Err(IgnoredIntent::Unchanged);
    }
    round.chosen_category = Some(category);
    Ok(())
}

fn draw_next_card(state: &mut GameState, now: Timestamp) -> Step {
    let category = state.round.chosen_category.ok_or(IgnoredIntent::NoCategory)?;
    let card_id = state
        .decks
        .draw_next(category)
        .ok_or(IgnoredIntent::EmptyCategory)?;

    trace!(%category, card = %card_id, cursor = state.decks.cursor(category), "card drawn");

    let text = state
        .decks
        .card(&card_id)
        .map_or_else(|| card_id.to_string(), |c| c.text.clone());
    state.round.active_card_id = Some(card_id);
    state.round.steal_lock_team_id = None;
    state.push_event(EventKind::CardDrawn, format!("Card drawn: {text}."), now);
    Ok(())
}

// === Card Resolution ===

fn mark_correct(state: &mut GameState, team_ids: &[TeamId], now: Timestamp) -> Step {
    let card_id = state
        .round
        .active_card_id
        .clone()
        .ok_or(IgnoredIntent::NoActiveCard)?;

    let (awarded, via): (SmallVec<[TeamId; 4]>, ResolvedVia) = if state.round.mode.is_all_in() {
        let mut awarded = SmallVec::new();
        for id in team_ids {
            if state.team(id).is_some() && !awarded.contains(id) {
                awarded.push(id.clone());
            }
        }
        if awarded.is_empty() {
            return Err(IgnoredIntent::NoAwardedTeams);
        }
        (awarded, ResolvedVia::AllIn)
    } else {
        let active = state.active_team().ok_or(IgnoredIntent::NoActiveTeam)?;
        (smallvec![active.id.clone()], ResolvedVia::TeamGuess)
    };

    let names = team_names(state, &awarded);
    state.round.resolved_cards.push_back(ResolvedCard {
        card_id,
        awarded_team_ids: awarded,
        via,
    });
    state.round.clear_active_card();
    state.push_event(EventKind::CardScored, format!("Card marked correct for {names}."), now);
    Ok(())
}

fn mark_pass(state: &mut GameState, now: Timestamp) -> Step {
    if state.round.active_card_id.is_none() {
        return Err(IgnoredIntent::NoActiveCard);
    }

    if state.round.mode == RoundMode::Normal {
        if let Some(team_id) = state.round.active_team_id.clone() {
            state.round.penalties.push_back(PenaltyEvent {
                kind: PenaltyKind::Pass,
                source_team_id: team_id,
                created_at: now,
            });
        }
    }
    state.round.kill_active_card();
    state.push_event(EventKind::Pass, "Card passed.", now);
    Ok(())
}

fn apply_penalty(
    state: &mut GameState,
    kind: PenaltyKind,
    source: Option<&TeamId>,
    now: Timestamp,
) -> Step {
    let source = source
        .or(state.round.active_team_id.as_ref())
        .ok_or(IgnoredIntent::NoActiveTeam)?;
    let team = state.team(source).ok_or(IgnoredIntent::UnknownTeam)?;

    let message = format!("Penalty logged against {}: {}.", team.name, kind.name());
    let source_team_id = team.id.clone();
    state.round.penalties.push_back(PenaltyEvent {
        kind,
        source_team_id,
        created_at: now,
    });
    state.push_event(EventKind::Penalty, message, now);
    Ok(())
}

fn mark_dead_card(state: &mut GameState) -> Step {
    if state.round.active_card_id.is_none() {
        return Err(IgnoredIntent::NoActiveCard);
    }
    state.round.kill_active_card();
    Ok(())
}

// === Lifelines ===

fn activate_uncuff(state: &mut GameState) -> Step {
    if state.round.mode != RoundMode::Normal {
        return Err(IgnoredIntent::NotNormalMode);
    }
    if !state.round.timer_running {
        return Err(IgnoredIntent::TimerStopped);
    }
    let team = state.active_team().ok_or(IgnoredIntent::NoActiveTeam)?;
    if team.uncuff_remaining == 0 {
        return Err(IgnoredIntent::NoLifelineLeft);
    }

    let team_id = team.id.clone();
    state.update_team(&team_id, |t| t.uncuff_remaining = t.uncuff_remaining.saturating_sub(1));
    state.round.uncuff_active = true;
    Ok(())
}

fn request_steal_lock(state: &mut GameState, team_id: &TeamId, now: Timestamp) -> Step {
    let round = &state.round;
    if round.mode != RoundMode::Normal {
        return Err(IgnoredIntent::NotNormalMode);
    }
    if !round.timer_running {
        return Err(IgnoredIntent::TimerStopped);
    }
    if round.active_card_id.is_none() {
        return Err(IgnoredIntent::NoActiveCard);
    }
    if round.steal_lock_team_id.is_some() {
        return Err(IgnoredIntent::StealAlreadyLocked);
    }
    let team = state.team(team_id).ok_or(IgnoredIntent::UnknownTeam)?;
    if round.active_team_id.as_ref() == Some(team_id) {
        return Err(IgnoredIntent::StealFromSelf);
    }
    if team.steal_remaining == 0 {
        return Err(IgnoredIntent::NoLifelineLeft);
    }

    let message = format!("{} locked a steal attempt.", team.name);
    state.round.steal_lock_team_id = Some(team_id.clone());
    state.push_event(EventKind::StealLocked, message, now);
    Ok(())
}

fn resolve_steal(state: &mut GameState, correct: bool, now: Timestamp) -> Step {
    let stealer = state
        .round
        .steal_lock_team_id
        .clone()
        .ok_or(IgnoredIntent::NoStealLock)?;
    let card_id = state
        .round
        .active_card_id
        .clone()
        .ok_or(IgnoredIntent::NoActiveCard)?;
    let name = team_names(state, std::slice::from_ref(&stealer));

    if correct {
        state.round.resolved_cards.push_back(ResolvedCard {
            card_id,
            awarded_team_ids: smallvec![stealer],
            via: ResolvedVia::Steal,
        });
        state.round.clear_active_card();
        state.push_event(
            EventKind::StealResolved,
            format!("Steal success. {name} takes the points."),
            now,
        );
    } else {
        // The card stays in play for the active team.
        state.update_team(&stealer, |t| t.steal_remaining = t.steal_remaining.saturating_sub(1));
        state.round.steal_lock_team_id = None;
        state.push_event(
            EventKind::StealResolved,
            format!("Steal failed. Card burned for {name}."),
            now,
        );
    }
    Ok(())
}

// === Timer ===

fn start_timer(state: &mut GameState) -> Step {
    if state.round.timer_running {
        return Err(IgnoredIntent::Unchanged);
    }
    if state.round.timer_seconds_left == 0 {
        return Err(IgnoredIntent::TimerExpired);
    }
    state.round.timer_running = true;
    Ok(())
}

fn timer_tick(state: &mut GameState, seconds: u32) -> Step {
    let round = &mut state.round;
    if !round.timer_running {
        return Err(IgnoredIntent::TimerStopped);
    }
    if seconds == 0 {
        return Err(IgnoredIntent::Unchanged);
    }

    round.timer_seconds_left = round.timer_seconds_left.saturating_sub(seconds);
    trace!(seconds_left = round.timer_seconds_left, "timer tick");

    if round.timer_seconds_left == 0 {
        round.timer_running = false;
        round.kill_active_card();
    }
    Ok(())
}

// === Scoring and Turn Order ===

fn end_round_and_score(state: &mut GameState, now: Timestamp) {
    state.teams = score_round(&state.teams, &state.round, &state.decks);
    state.push_event(EventKind::RoundScored, "Round scored and points applied.", now);
    info!(
        scores = ?state.teams.iter().map(|t| (t.id.as_str(), t.score)).collect::<Vec<_>>(),
        "round scored"
    );

    match RoundOutcome::from_scores(&state.teams, state.target_score) {
        RoundOutcome::Winner(team_id) => finish(state, &team_id, now),
        RoundOutcome::Tie(tied) => {
            info!(teams = tied.len(), "tie at target score");
            rotate(state, RoundMode::TiebreakAllIn);
            state.winner_team_ids.clear();
            state.push_event(
                EventKind::TiebreakStarted,
                "Tie detected. Starting all-in tiebreak round.",
                now,
            );
        }
        RoundOutcome::Continue => {
            rotate(state, RoundMode::Normal);
            state.winner_team_ids.clear();
        }
    }
}

fn check_win_or_tiebreak(state: &mut GameState, now: Timestamp) -> Step {
    match RoundOutcome::from_scores(&state.teams, state.target_score) {
        RoundOutcome::Winner(team_id) => {
            finish(state, &team_id, now);
            Ok(())
        }
        RoundOutcome::Tie(_) => {
            let round = &mut state.round;
            round.mode = RoundMode::TiebreakAllIn;
            round.die_face = DieFace::AllIn;
            round.chosen_category = None;
            round.timer_running = false;
            round.uncuff_active = false;
            round.clear_active_card();
            state.winner_team_ids.clear();
            state.push_event(
                EventKind::TiebreakStarted,
                "Tie detected. Switching to all-in tiebreak.",
                now,
            );
            Ok(())
        }
        RoundOutcome::Continue => Err(IgnoredIntent::NoTeamAtTarget),
    }
}

fn start_tiebreak(state: &mut GameState, now: Timestamp) {
    state.round = RoundState::fresh(
        RoundMode::TiebreakAllIn,
        state.round.active_team_id.clone(),
        state.round.active_player_id.clone(),
        state.settings.turn_seconds,
    );
    state.push_event(EventKind::TiebreakStarted, "Starting all-in tiebreak round.", now);
}

fn resolve_tiebreak(state: &mut GameState, winner: Option<&TeamId>, now: Timestamp) -> Step {
    if state.round.mode != RoundMode::TiebreakAllIn {
        return Err(IgnoredIntent::NotTiebreak);
    }

    if winner.is_some_and(|id| state.team(id).is_none()) {
        return Err(IgnoredIntent::UnknownTeam);
    }

    // The deciding round counts toward the final totals.
    state.teams = score_round(&state.teams, &state.round, &state.decks);
    if let Some(team_id) = winner {
        finish(state, team_id, now);
        return Ok(());
    }

    let scores: Vec<TeamScore> = state
        .teams
        .iter()
        .map(|t| TeamScore {
            team_id: t.id.clone(),
            score: t.score,
        })
        .collect();
    let leaders = leading_teams(&scores);
    if let [leader] = leaders.as_slice() {
        let leader = leader.clone();
        finish(state, &leader, now);
    } else {
        start_tiebreak(state, now);
    }
    Ok(())
}

fn advance_to_next_team(state: &mut GameState) {
    rotate(state, RoundMode::Normal);
}

/// Pass play clockwise and open a fresh round in `mode`.
fn rotate(state: &mut GameState, mode: RoundMode) {
    let rotation = advance_clockwise(&state.teams, state.round.active_team_id.as_ref());
    state.teams = rotation.teams;
    state.round = RoundState::fresh(
        mode,
        rotation.next_team_id,
        rotation.next_player_id,
        state.settings.turn_seconds,
    );
}

fn finish(state: &mut GameState, team_id: &TeamId, now: Timestamp) {
    state.status = GameStatus::Finished;
    state.winner_team_ids = vec![team_id.clone()];
    state.round.timer_running = false;
    state.round.clear_active_card();

    let name = team_names(state, std::slice::from_ref(team_id));
    info!(winner = %team_id, "game finished");
    state.push_event(EventKind::WinnerDeclared, format!("{name} wins the game."), now);
}

// === Helpers ===

fn active_team_name(state: &GameState) -> String {
    state
        .active_team()
        .map_or_else(|| "team".to_string(), |t| t.name.clone())
}

fn team_names(state: &GameState, ids: &[TeamId]) -> String {
    ids.iter()
        .map(|id| state.team(id).map_or_else(|| id.to_string(), |t| t.name.clone()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{DeckState, PromptCard};
    use crate::core::{GameSettings, Player, Team};

    fn init(teams: usize) -> InitGame {
        let mut team_list = Vec::new();
        let mut players = Vec::new();
        for i in 0..teams {
            let id = TeamId::for_index(i);
            let player_ids: Vec<PlayerId> = (0..2).map(|p| PlayerId::for_team(&id, p)).collect();
            for (order, pid) in player_ids.iter().enumerate() {
                players.push(Player {
                    id: pid.clone(),
                    team_id: id.clone(),
                    name: format!("P{}{}", i + 1, order + 1),
                    order,
                });
            }
            team_list.push(Team::new(id, format!("Team {}", i + 1), player_ids));
        }
        let cards: Vec<PromptCard> = Category::ALL
            .iter()
            .flat_map(|&c| (0..3).map(move |n| PromptCard::new(format!("{c}-{n}"), c, format!("{c} {n}"), 2)))
            .collect();
        InitGame {
            teams: team_list,
            players,
            target_score: 30,
            settings: GameSettings::default(),
            decks: DeckState::from_cards(&cards, "engine"),
        }
    }

    fn started(teams: usize) -> GameState {
        let t = Timestamp(0);
        let mut state = transition(&GameState::empty(), &Action::InitGame(Box::new(init(teams))), t);
        state = transition(
            &state,
            &Action::AssignFirstClueGiver {
                team_id: TeamId::new("team-1"),
                player_id: PlayerId::new("team-1-player-1"),
            },
            t,
        );
        transition(&state, &Action::StartRound, t)
    }

    #[test]
    fn test_ignored_outside_game() {
        let state = GameState::empty();
        assert_eq!(
            try_transition(&state, &Action::StartRound, Timestamp(0)),
            Err(IgnoredIntent::NotInGame)
        );
        assert_eq!(transition(&state, &Action::DrawNextCard, Timestamp(0)), state);
    }

    #[test]
    fn test_init_resets_round_and_log() {
        let state = transition(&GameState::empty(), &Action::InitGame(Box::new(init(3))), Timestamp(5));
        assert_eq!(state.status, GameStatus::InGame);
        assert_eq!(state.teams.len(), 3);
        assert_eq!(state.round.timer_seconds_left, 60);
        assert!(state.round.active_team_id.is_none());
        assert!(state.log.is_empty());
    }

    #[test]
    fn test_assign_first_clue_giver_moves_cursor() {
        let state = started(2);
        assert_eq!(state.round.active_player_id, Some(PlayerId::new("team-1-player-1")));
        assert_eq!(state.teams[0].next_player_index, 1);

        let bad = try_transition(
            &state,
            &Action::AssignFirstClueGiver {
                team_id: TeamId::new("team-1"),
                player_id: PlayerId::new("team-2-player-1"),
            },
            Timestamp(0),
        );
        assert_eq!(bad, Err(IgnoredIntent::UnknownPlayer));
    }

    #[test]
    fn test_roll_category_sets_normal_mode() {
        let state = transition(&started(2), &Action::RollDie { face: DieFace::Nature }, Timestamp(1));
        assert_eq!(state.round.mode, RoundMode::Normal);
        assert_eq!(state.round.chosen_category, Some(Category::Nature));
        assert_eq!(state.log[0].kind, EventKind::DieRolled);
        assert_eq!(state.log[0].message, "Die rolled: nature.");
    }

    #[test]
    fn test_set_category_only_in_all_in() {
        let state = started(2);
        let err = try_transition(
            &state,
            &Action::SetAllInCategory { category: Category::Ps },
            Timestamp(0),
        );
        assert_eq!(err, Err(IgnoredIntent::NotAllInMode));

        let all_in = transition(&state, &Action::RollDie { face: DieFace::AllIn }, Timestamp(0));
        assert_eq!(all_in.round.chosen_category, None);
        let chosen = transition(&all_in, &Action::SetAllInCategory { category: Category::Ps }, Timestamp(0));
        assert_eq!(chosen.round.chosen_category, Some(Category::Ps));
    }

    #[test]
    fn test_draw_requires_category() {
        let mut state = started(2);
        state.round.chosen_category = None;
        assert_eq!(
            try_transition(&state, &Action::DrawNextCard, Timestamp(0)),
            Err(IgnoredIntent::NoCategory)
        );
    }

    #[test]
    fn test_timer_tick_expires_active_card() {
        let mut state = started(2);
        for action in [
            Action::RollDie { face: DieFace::Action },
            Action::DrawNextCard,
            Action::StartTimer,
        ] {
            state = transition(&state, &action, Timestamp(0));
        }
        let card = state.round.active_card_id.clone().unwrap();

        state = transition(&state, &Action::TimerTick { seconds: 59 }, Timestamp(0));
        assert!(state.round.timer_running);
        assert_eq!(state.round.timer_seconds_left, 1);

        state = transition(&state, &Action::TimerTick { seconds: 5 }, Timestamp(0));
        assert_eq!(state.round.timer_seconds_left, 0);
        assert!(!state.round.timer_running);
        assert_eq!(state.round.active_card_id, None);
        assert_eq!(state.round.dead_card_ids.back(), Some(&card));

        assert_eq!(
            try_transition(&state, &Action::StartTimer, Timestamp(0)),
            Err(IgnoredIntent::TimerExpired)
        );
    }

    #[test]
    fn test_penalty_defaults_to_active_team() {
        let state = transition(
            &started(3),
            &Action::ApplyPenalty {
                kind: PenaltyKind::HandsUnclasped,
                source_team_id: None,
            },
            Timestamp(9),
        );
        let penalty = state.round.penalties.back().unwrap();
        assert_eq!(penalty.source_team_id, TeamId::new("team-1"));
        assert_eq!(penalty.created_at, Timestamp(9));
        assert_eq!(state.log[0].message, "Penalty logged against Team 1: hands_unclasped.");

        let unknown = try_transition(
            &state,
            &Action::ApplyPenalty {
                kind: PenaltyKind::Pass,
                source_team_id: Some(TeamId::new("team-9")),
            },
            Timestamp(0),
        );
        assert_eq!(unknown, Err(IgnoredIntent::UnknownTeam));
    }

    #[test]
    fn test_resolve_tiebreak_requires_tiebreak() {
        let state = started(2);
        assert_eq!(
            try_transition(&state, &Action::ResolveTiebreak { winner_team_id: None }, Timestamp(0)),
            Err(IgnoredIntent::NotTiebreak)
        );
    }

    #[test]
    fn test_start_tiebreak_keeps_clue_giver() {
        let rolled = transition(&started(3), &Action::RollDie { face: DieFace::Object }, Timestamp(0));
        let state = transition(&rolled, &Action::StartTiebreakAllIn, Timestamp(4));

        assert_eq!(state.round.mode, RoundMode::TiebreakAllIn);
        assert_eq!(state.round.chosen_category, None);
        assert_eq!(state.round.active_team_id, rolled.round.active_team_id);
        assert_eq!(state.round.active_player_id, rolled.round.active_player_id);
        assert_eq!(state.log[0].kind, EventKind::TiebreakStarted);

        // Tiebreak mode survives further die rolls.
        let again = transition(&state, &Action::RollDie { face: DieFace::AllIn }, Timestamp(5));
        assert_eq!(again.round.mode, RoundMode::TiebreakAllIn);
    }

    #[test]
    fn test_reset_and_rehydrate() {
        let state = started(2);
        let reset = transition(&state, &Action::Reset, Timestamp(0));
        assert_eq!(reset, GameState::empty());

        let back = transition(&reset, &Action::Rehydrate(Box::new(state.clone())), Timestamp(0));
        assert_eq!(back, state);
    }

    #[test]
    fn test_legal_actions_follow_round_state() {
        let fresh = transition(&GameState::empty(), &Action::InitGame(Box::new(init(2))), Timestamp(0));
        let actions = legal_actions(&fresh);
        assert!(actions.contains(&Action::AssignFirstClueGiver {
            team_id: TeamId::new("team-2"),
            player_id: PlayerId::new("team-2-player-2"),
        }));

        let state = started(2);
        let actions = legal_actions(&state);
        assert!(!actions.iter().any(|a| matches!(a, Action::AssignFirstClueGiver { .. })));
        assert!(actions.contains(&Action::RollDie { face: DieFace::AllIn }));
        assert!(!actions.contains(&Action::DrawNextCard));
        assert!(actions.contains(&Action::StartTimer));
        assert!(!actions.contains(&Action::MarkPass));
        assert!(!actions.contains(&Action::ActivateUncuff));
        assert!(!actions.contains(&Action::tick()));

        let running = transition(&state, &Action::StartTimer, Timestamp(0));
        let actions = legal_actions(&running);
        assert!(actions.contains(&Action::ActivateUncuff));
        assert!(actions.contains(&Action::tick()));
        assert!(!actions.contains(&Action::StartTimer));
    }

    #[test]
    fn test_legal_actions_outside_game() {
        assert!(legal_actions(&GameState::empty()).is_empty());
    }

    #[test]
    fn test_check_win_without_target_is_ignored() {
        assert_eq!(
            try_transition(&started(2), &Action::CheckWinOrTiebreak, Timestamp(0)),
            Err(IgnoredIntent::NoTeamAtTarget)
        );
    }
}
