//! Digital-rain frame generator for the loading overlay.

use rand::Rng;
use serde::Serialize;

pub const CHARACTERS: &[u8] = b"0123456789ABCDEFHIJKLMNOPQRSTUVWXYZ@#$%^&*()";
pub const FONT_SIZE: u32 = 16;
/// Chance per frame that a drop past the bottom edge restarts at the top.
const RESET_PROBABILITY: f64 = 0.025;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Glyph {
    pub ch: char,
    pub x: u32,
    pub y: u32,
}

pub struct MatrixRain {
    height: u32,
    drops: Vec<u32>,
}

impl MatrixRain {
    pub fn new(width: u32, height: u32) -> Self {
        let columns = (width / FONT_SIZE).max(1) as usize;
        Self {
            height,
            drops: vec![1; columns],
        }
    }

    #[cfg(test)]
    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    /// Draws one glyph per column and advances every drop.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Vec<Glyph> {
        let mut frame = Vec::with_capacity(self.drops.len());
        for (i, drop) in self.drops.iter_mut().enumerate() {
            let ch = CHARACTERS[rng.gen_range(0..CHARACTERS.len())] as char;
            frame.push(Glyph {
                ch,
                x: i as u32 * FONT_SIZE,
                y: *drop * FONT_SIZE,
            });

            if *drop * FONT_SIZE > self.height && rng.gen_bool(RESET_PROBABILITY) {
                *drop = 0;
            }
            *drop += 1;
        }
        frame
    }
}
