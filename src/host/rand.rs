/// The `sfc32` small-fast-counter generator used by fxhash-style hosts.
///
/// State and arithmetic are 32-bit wrapping; [`Sfc32::next_f64`] returns `t / 2^32`, so every
/// sample lies in `[0, 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sfc32 {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl Sfc32 {
    /// Seed the generator from four 32-bit words.
    pub fn new(seeds: [u32; 4]) -> Self {
        let [a, b, c, d] = seeds;
        Self { a, b, c, d }
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        let t = self.a.wrapping_add(self.b).wrapping_add(self.d);
        self.d = self.d.wrapping_add(1);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21);
        self.c = self.c.wrapping_add(t);
        t
    }

    /// Next uniform sample in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/rand.rs"]
mod tests;
