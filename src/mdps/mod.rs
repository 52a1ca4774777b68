pub mod mdp;
pub mod mdp_simulator;
pub mod reward;
pub mod tables;
pub mod transitions;
