// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Output Grids
// ─────────────────────────────────────────────────────────────────────
//! Dense `nx × ny` result matrices, one per physical channel.

use serde::{Deserialize, Serialize};

use gravgrad_types::{GravGradError, GravGradResult};

/// Physical quantity carried by an output grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Gz,
    Gy,
    Gzx,
    Gzy,
    Gzz,
    Gyx,
    Gyy,
    Gxx,
}

impl Channel {
    /// Field channels, in reporting order.
    pub const FIELD: [Channel; 2] = [Channel::Gz, Channel::Gy];

    /// Every channel, in reporting order.
    pub const ALL: [Channel; 8] = [
        Channel::Gz,
        Channel::Gy,
        Channel::Gzx,
        Channel::Gzy,
        Channel::Gzz,
        Channel::Gyx,
        Channel::Gyy,
        Channel::Gxx,
    ];

    /// Channels produced for the given mode.
    pub fn for_mode(gradient_enabled: bool) -> &'static [Channel] {
        if gradient_enabled {
            &Self::ALL
        } else {
            &Self::FIELD
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Gz => "gz",
            Channel::Gy => "gy",
            Channel::Gzx => "gzx",
            Channel::Gzy => "gzy",
            Channel::Gzz => "gzz",
            Channel::Gyx => "gyx",
            Channel::Gyy => "gyy",
            Channel::Gxx => "gxx",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn is_gradient(self) -> bool {
        !matches!(self, Channel::Gz | Channel::Gy)
    }

    pub fn unit(self) -> &'static str {
        if self.is_gradient() {
            "Eotvos"
        } else {
            "mGal"
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Row-major `nx × ny` matrix indexed `[ix, iy]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid2 {
    nx: usize,
    ny: usize,
    data: Vec<f64>,
}

impl Grid2 {
    pub fn zeros(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            data: vec![0.0; nx * ny],
        }
    }

    /// Wrap row-major data; length must be `nx * ny`.
    pub fn from_vec(nx: usize, ny: usize, data: Vec<f64>) -> GravGradResult<Self> {
        if data.len() != nx * ny {
            return Err(GravGradError::Dimension {
                expected: nx * ny,
                actual: data.len(),
            });
        }
        Ok(Self { nx, ny, data })
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index(&self, ix: usize, iy: usize) -> usize {
        debug_assert!(ix < self.nx && iy < self.ny);
        ix * self.ny + iy
    }

    #[inline]
    pub fn get(&self, ix: usize, iy: usize) -> f64 {
        self.data[self.index(ix, iy)]
    }

    #[inline]
    pub fn set(&mut self, ix: usize, iy: usize, value: f64) {
        let i = self.index(ix, iy);
        self.data[i] = value;
    }

    #[inline]
    pub fn add(&mut self, ix: usize, iy: usize, value: f64) {
        let i = self.index(ix, iy);
        self.data[i] += value;
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    /// Arithmetic mean, summed in storage order.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    pub fn sub_scalar(&mut self, value: f64) {
        for v in &mut self.data {
            *v -= value;
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// One `Vec` per x index.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        if self.ny == 0 {
            return vec![Vec::new(); self.nx];
        }
        self.data.chunks(self.ny).map(<[f64]>::to_vec).collect()
    }

    /// First non-finite cell, if any.
    pub fn first_non_finite(&self) -> Option<(usize, usize, f64)> {
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|i| (i / self.ny, i % self.ny, self.data[i]))
    }
}

/// One grid tagged with its channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelGrid {
    pub channel: Channel,
    pub grid: Grid2,
}

/// The requested output channels of one run, in reporting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputGrids {
    nx: usize,
    ny: usize,
    channels: Vec<ChannelGrid>,
}

impl OutputGrids {
    /// Zero-initialised grids for the given mode.
    pub fn zeros(nx: usize, ny: usize, gradient_enabled: bool) -> Self {
        Self {
            nx,
            ny,
            channels: Channel::for_mode(gradient_enabled)
                .iter()
                .map(|&channel| ChannelGrid {
                    channel,
                    grid: Grid2::zeros(nx, ny),
                })
                .collect(),
        }
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn has_gradient(&self) -> bool {
        self.channels.iter().any(|c| c.channel.is_gradient())
    }

    pub fn get(&self, channel: Channel) -> Option<&Grid2> {
        self.channels
            .iter()
            .find(|c| c.channel == channel)
            .map(|c| &c.grid)
    }

    pub fn get_mut(&mut self, channel: Channel) -> Option<&mut Grid2> {
        self.channels
            .iter_mut()
            .find(|c| c.channel == channel)
            .map(|c| &mut c.grid)
    }

    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.iter().map(|c| c.channel)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &Grid2)> {
        self.channels.iter().map(|c| (c.channel, &c.grid))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Channel, &mut Grid2)> {
        self.channels.iter_mut().map(|c| (c.channel, &mut c.grid))
    }

    /// Values of every channel at one cell, in reporting order.
    pub fn values_at(&self, ix: usize, iy: usize) -> Vec<(Channel, f64)> {
        self.iter().map(|(ch, g)| (ch, g.get(ix, iy))).collect()
    }
}
