//! Interactive game loop.
//!
//! The house drives a fresh protocol run for every random decision and checks
//! each reveal on the player's behalf before using the result.

use crate::render::render_table;
use anyhow::Result;
use fair_dice_core::{
    compute_table, CryptoProvider, Die, FairDiceError, GameOutcome, GameState, Player,
    ProbabilityMatrix, ProtocolRun, RoundTranscript, Verifier,
};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// One fair draw as the player saw it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FairDraw {
    secret: u64,
    contribution: u64,
    result: u64,
}

pub struct Controller<R, W, P> {
    input: R,
    output: W,
    provider: P,
    state: GameState,
    table: ProbabilityMatrix,
    transcripts: Vec<RoundTranscript>,
}

impl<R: BufRead, W: Write, P: CryptoProvider> Controller<R, W, P> {
    pub fn new(input: R, output: W, provider: P, dice: Vec<Die>) -> Result<Self> {
        let table = compute_table(&dice)?;
        let state = GameState::new(dice)?;
        Ok(Self {
            input,
            output,
            provider,
            state,
            table,
            transcripts: Vec::new(),
        })
    }

    /// Transcripts of every finalized run so far
    pub fn transcripts(&self) -> &[RoundTranscript] {
        &self.transcripts
    }

    /// Play one game. `None` means the player quit.
    pub fn play(&mut self) -> Result<Option<GameOutcome>> {
        self.state.reset();
        writeln!(self.output, "Welcome to Fair Dice!")?;
        self.show_table()?;

        writeln!(self.output, "Let's determine who makes the first move.")?;
        let Some(coin) = self.fair_number(2, "Try to guess my selection.")? else {
            return Ok(None);
        };

        let (human_die, house_die) = if coin.result == 0 {
            writeln!(self.output, "You guessed it, you make the first move.")?;
            let Some(human_die) = self.human_select()? else {
                return Ok(None);
            };
            (human_die, self.house_select()?)
        } else {
            writeln!(self.output, "I make the first move.")?;
            let house_die = self.house_select()?;
            let Some(human_die) = self.human_select()? else {
                return Ok(None);
            };
            (human_die, house_die)
        };

        let Some(human_score) = self.throw(Player::Human, &human_die)? else {
            return Ok(None);
        };
        let Some(house_score) = self.throw(Player::House, &house_die)? else {
            return Ok(None);
        };

        let outcome = GameOutcome::judge(human_score, house_score);
        match outcome {
            GameOutcome::HumanWins => {
                writeln!(self.output, "You win ({} > {})!", human_score, house_score)?
            }
            GameOutcome::HouseWins => {
                writeln!(self.output, "I win ({} > {})!", house_score, human_score)?
            }
            GameOutcome::Tie => {
                writeln!(self.output, "It's a tie ({} = {})!", human_score, house_score)?
            }
        }
        info!("Game finished: {}", outcome);
        Ok(Some(outcome))
    }

    fn show_table(&mut self) -> Result<()> {
        writeln!(self.output, "{}", render_table(self.state.dice(), &self.table))?;
        Ok(())
    }

    fn human_select(&mut self) -> Result<Option<Die>> {
        writeln!(self.output, "Choose your dice:")?;
        let available = self.state.available().to_vec();
        let labels: Vec<String> = available
            .iter()
            .map(|&index| self.state.dice()[index].to_string())
            .collect();

        let Some(position) = self.prompt(&labels)? else {
            return Ok(None);
        };
        let index = available[position];
        let die = self.state.select(Player::Human, index)?.clone();
        info!("Player selected die {}: {}", index, die);
        writeln!(self.output, "You choose the {} dice.", die)?;
        Ok(Some(die))
    }

    fn house_select(&mut self) -> Result<Die> {
        let index = self.state.house_choice(&mut self.provider, &self.table)?;
        let die = self.state.select(Player::House, index)?.clone();
        info!("House selected die {}: {}", index, die);
        writeln!(self.output, "I choose the {} dice.", die)?;
        Ok(die)
    }

    fn throw(&mut self, player: Player, die: &Die) -> Result<Option<i64>> {
        let (whose, whose_cap) = match player {
            Player::Human => ("your", "Your"),
            Player::House => ("my", "My"),
        };
        writeln!(self.output, "It's time for {} throw.", whose)?;

        let range = die.face_count() as u64;
        let ask = format!("Add your number modulo {}.", range);
        let Some(draw) = self.fair_number(range, &ask)? else {
            return Ok(None);
        };
        writeln!(
            self.output,
            "The fair number generation result is {} + {} = {} (mod {}).",
            draw.secret, draw.contribution, draw.result, range
        )?;

        let face = die.face_at(draw.result as usize)?;
        writeln!(self.output, "{} throw is {}.", whose_cap, face)?;
        Ok(Some(face))
    }

    /// Commit, collect the player's number, reveal and verify.
    ///
    /// A reveal that does not match the commitment ends the game with
    /// `CommitmentMismatch`.
    fn fair_number(&mut self, range: u64, ask: &str) -> Result<Option<FairDraw>> {
        let mut run = ProtocolRun::start(range, &mut self.provider)?;
        let message = run.commit_message()?;
        info!(
            "Committed run {} over range {}: {}",
            message.run_id, range, message.commitment
        );
        writeln!(
            self.output,
            "I selected a random value in the range 0..{} (HMAC={}).",
            range - 1,
            message.commitment
        )?;
        writeln!(self.output, "{}", ask)?;

        let labels: Vec<String> = (0..range).map(|n| n.to_string()).collect();
        let Some(choice) = self.prompt(&labels)? else {
            debug!("Player left during run {}", message.run_id);
            return Ok(None);
        };
        let contribution = choice as u64;
        run.supply_contribution(contribution)?;
        let mut verifier = Verifier::from_message(&message)?;
        verifier.contribute(contribution)?;

        let reveal = run.reveal()?;
        writeln!(
            self.output,
            "My selection: {} (KEY={}).",
            reveal.value,
            reveal.key.to_hex_upper()
        )?;
        let checked = verifier.verify_and_combine(&reveal)?;
        let result = run.finalize()?;
        if checked != result {
            return Err(FairDiceError::CommitmentMismatch.into());
        }
        debug!(
            "Verified run {}: {} + {} = {} (mod {})",
            message.run_id, reveal.value, contribution, result, range
        );

        self.transcripts.push(run.transcript()?);
        Ok(Some(FairDraw {
            secret: reveal.value,
            contribution,
            result,
        }))
    }

    /// Numbered menu; returns the chosen position, `None` on exit or EOF
    fn prompt(&mut self, options: &[String]) -> Result<Option<usize>> {
        loop {
            for (i, label) in options.iter().enumerate() {
                writeln!(self.output, "{} - {}", i, label)?;
            }
            writeln!(self.output, "X - exit")?;
            writeln!(self.output, "? - help")?;
            write!(self.output, "Your selection: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }
            match line.trim() {
                "X" | "x" => return Ok(None),
                "?" => self.show_table()?,
                choice => match choice.parse::<usize>() {
                    Ok(position) if position < options.len() => return Ok(Some(position)),
                    _ => writeln!(self.output, "Invalid selection. Please try again.")?,
                },
            }
        }
    }
}
