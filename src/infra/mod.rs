//! Инфраструктурный слой вокруг покерного движка:
//! - генерация id соединений и кодов комнат;
//! - RNG-реализации для тасовки колоды.

pub mod ids;
pub mod rng;

pub use ids::*;
pub use rng::*;
