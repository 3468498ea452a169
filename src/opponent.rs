use crate::choice::Choice;
use rand::{thread_rng, Rng};
use std::collections::VecDeque;

/// Where the opponent's moves come from. The server installs a uniform
/// random source; tests substitute a scripted one.
pub trait ChoiceSource: Send {
    fn pick(&mut self) -> Choice;
}

/// Uniform over the three moves, independent each round.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformChoice;

impl ChoiceSource for UniformChoice {
    fn pick(&mut self) -> Choice {
        let mut rng = thread_rng();
        Choice::ALL[rng.gen_range(0..Choice::ALL.len())]
    }
}

/// Replays a fixed sequence of moves, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedChoices {
    script: VecDeque<Choice>,
}

impl ScriptedChoices {
    pub fn new(script: impl Into<VecDeque<Choice>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl ChoiceSource for ScriptedChoices {
    fn pick(&mut self) -> Choice {
        match self.script.pop_front() {
            Some(choice) => {
                self.script.push_back(choice);
                choice
            }
            // An empty script degenerates to rock forever.
            None => Choice::Rock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stays_in_domain() {
        let mut source = UniformChoice;
        for _ in 0..100 {
            assert!(Choice::ALL.contains(&source.pick()));
        }
    }

    #[test]
    fn test_scripted_cycles_in_order() {
        let mut source = ScriptedChoices::new(vec![Choice::Rock, Choice::Paper]);
        assert_eq!(source.pick(), Choice::Rock);
        assert_eq!(source.pick(), Choice::Paper);
        assert_eq!(source.pick(), Choice::Rock);
        assert_eq!(source.pick(), Choice::Paper);
    }

    #[test]
    fn test_empty_script_falls_back_to_rock() {
        let mut source = ScriptedChoices::new(Vec::new());
        assert_eq!(source.pick(), Choice::Rock);
        assert_eq!(source.pick(), Choice::Rock);
    }
}
