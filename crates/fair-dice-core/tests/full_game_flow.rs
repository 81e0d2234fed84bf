//! Integration tests for the full game flow.
//!
//! These tests play complete games through the public API, with the house
//! driving ProtocolRuns and the human checking every reveal with a Verifier.

use fair_dice_core::{
    compute_table,
    crypto::{CryptoProvider, SeededCryptoProvider},
    protocol::{CommitMessage, RoundTranscript},
    Die, FairDiceError, GameOutcome, GameState, Player, ProtocolRun, Verifier,
};

fn intransitive_dice() -> Vec<Die> {
    vec![
        Die::new(vec![2, 2, 4, 4, 9, 9]).unwrap(),
        Die::new(vec![1, 1, 6, 6, 8, 8]).unwrap(),
        Die::new(vec![3, 3, 5, 5, 7, 7]).unwrap(),
    ]
}

/// One fair draw: house commits, human contributes and verifies
fn fair_draw<P: CryptoProvider>(
    provider: &mut P,
    range: u64,
    human_number: u64,
) -> (u64, RoundTranscript) {
    let mut run = ProtocolRun::start(range, provider).unwrap();

    // The commitment crosses the channel as a message
    let message: CommitMessage = run.commit_message().unwrap();
    let mut verifier = Verifier::from_message(&message).unwrap();
    verifier.contribute(human_number).unwrap();
    run.supply_contribution(human_number).unwrap();

    let reveal = run.reveal().unwrap();
    let human_view = verifier.verify_and_combine(&reveal).unwrap();
    let house_view = run.finalize().unwrap();
    assert_eq!(human_view, house_view);

    (house_view, run.transcript().unwrap())
}

/// Simulate a complete game where the human picks 0 for every contribution
#[test]
fn test_full_game() {
    let mut provider = SeededCryptoProvider::from_seed(2024);
    let dice = intransitive_dice();
    let table = compute_table(&dice).unwrap();
    let mut state = GameState::new(dice).unwrap();

    // Phase 1: fair coin for turn order
    let (coin, coin_transcript) = fair_draw(&mut provider, 2, 0);
    assert!(coin < 2);
    assert_eq!(coin_transcript.verify().unwrap(), coin);
    let first = if coin == 0 { Player::Human } else { Player::House };

    // Phase 2: die selection
    match first {
        Player::Human => {
            state.select(Player::Human, 0).unwrap();
            let pick = state.house_choice(&mut provider, &table).unwrap();
            assert_eq!(pick, 2, "house counters die 0 with die 2");
            state.select(Player::House, pick).unwrap();
        }
        Player::House => {
            let pick = state.house_choice(&mut provider, &table).unwrap();
            state.select(Player::House, pick).unwrap();
            let human = state.available()[0];
            state.select(Player::Human, human).unwrap();
        }
    }
    assert!(state.available().len() == 1);

    // Phase 3: one throw each
    let human_die = state.chosen_die(Player::Human).unwrap().clone();
    let house_die = state.chosen_die(Player::House).unwrap().clone();
    assert_ne!(human_die, house_die);

    let (human_index, human_transcript) =
        fair_draw(&mut provider, human_die.face_count() as u64, 3);
    let (house_index, house_transcript) =
        fair_draw(&mut provider, house_die.face_count() as u64, 5);
    assert_ne!(human_transcript.commit.run_id, house_transcript.commit.run_id);

    let human_score = human_die.face_at(human_index as usize).unwrap();
    let house_score = house_die.face_at(house_index as usize).unwrap();

    // Phase 4: outcome follows the scores
    let outcome = GameOutcome::judge(human_score, house_score);
    match outcome {
        GameOutcome::HumanWins => assert!(human_score > house_score),
        GameOutcome::HouseWins => assert!(house_score > human_score),
        GameOutcome::Tie => assert_eq!(human_score, house_score),
    }
}

/// A house that swaps its secret after the commitment is caught
#[test]
fn test_cheating_house_is_detected() {
    let mut provider = SeededCryptoProvider::from_seed(8);
    let mut run = ProtocolRun::start(6, &mut provider).unwrap();
    let mut verifier = Verifier::from_message(&run.commit_message().unwrap()).unwrap();

    verifier.contribute(2).unwrap();
    run.supply_contribution(2).unwrap();
    let mut reveal = run.reveal().unwrap();

    // Pretend the secret was whatever makes the face index 5
    reveal.value = (5 + 6 - 2) % 6;
    let honest = run.finalize().unwrap();

    match verifier.verify_and_combine(&reveal) {
        Err(FairDiceError::CommitmentMismatch) => {}
        Ok(result) => {
            // Only possible if the honest draw already was the forced value
            assert_eq!(result, honest);
            assert_eq!(result, 5);
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
}

/// Transcripts survive a JSON round trip and still verify
#[test]
fn test_transcript_replay() {
    let mut provider = SeededCryptoProvider::from_seed(77);
    let transcripts: Vec<RoundTranscript> = (0..5)
        .map(|i| fair_draw(&mut provider, 6, i).1)
        .collect();

    let lines: Vec<String> = transcripts
        .iter()
        .map(|t| serde_json::to_string(t).unwrap())
        .collect();

    for (line, original) in lines.iter().zip(&transcripts) {
        let parsed: RoundTranscript = serde_json::from_str(line).unwrap();
        assert_eq!(parsed.verify().unwrap(), original.reveal.result);
    }
}

/// A fresh game after reset starts from the full pool again
#[test]
fn test_rematch_after_reset() {
    let mut provider = SeededCryptoProvider::from_seed(3);
    let dice = intransitive_dice();
    let table = compute_table(&dice).unwrap();
    let mut state = GameState::new(dice).unwrap();

    for _ in 0..3 {
        let pick = state.house_choice(&mut provider, &table).unwrap();
        state.select(Player::House, pick).unwrap();
        let human = state.available()[0];
        state.select(Player::Human, human).unwrap();
        assert_eq!(state.available().len(), 1);
        state.reset();
    }
    assert_eq!(state.available(), &[0, 1, 2]);
}
