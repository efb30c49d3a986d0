// src/plot_functions/mod.rs

pub mod plot_energy_spectrum;

// src/plot_functions/mod.rs
