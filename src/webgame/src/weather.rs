use rand::Rng;

/// Wind regimes, each with its gust range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weather {
	Calm,
	LightBreeze,
	StrongBreeze,
	HighWind,
}

impl Weather {
	pub fn wind_range(self) -> (f32, f32) {
		match self {
			Weather::Calm => (20., 70.),
			Weather::LightBreeze => (50., 300.),
			Weather::StrongBreeze => (70., 450.),
			Weather::HighWind => (100., 800.),
		}
	}

	pub fn switch<R: Rng>(rng: &mut R) -> Self {
		match rng.gen_range(0..4) {
			0 => Weather::Calm,
			1 => Weather::LightBreeze,
			2 => Weather::StrongBreeze,
			_ => Weather::HighWind,
		}
	}

	pub fn sample_wind<R: Rng>(self, rng: &mut R) -> f32 {
		let (lo, hi) = self.wind_range();
		rng.gen_range(lo..=hi)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	#[test]
	fn test_gusts_stay_in_range() {
		let mut rng = StdRng::seed_from_u64(4);
		for state in [
			Weather::Calm,
			Weather::LightBreeze,
			Weather::StrongBreeze,
			Weather::HighWind,
		] {
			let (lo, hi) = state.wind_range();
			for _ in 0..100 {
				let wind = state.sample_wind(&mut rng);
				assert!(wind >= lo && wind <= hi);
			}
		}
	}
}
