pub mod sfx;
