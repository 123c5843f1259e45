/// Evenly spaced points over a closed interval, like numpy.linspace.
/// The last point is always exactly `max`.
pub struct Linspace {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 { (max - min) / (n - 1) as f64 } else { 0. };

        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }

        let i = self.index;
        self.index += 1;

        if i + 1 == self.len && self.len > 1 {
            Some(self.end)
        } else {
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    assert_eq!(Linspace::new(0., 1., 5).collect::<Vec<_>>(), vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(1., 11., 3).collect::<Vec<_>>(), vec![1., 6., 11.]);
    assert_eq!(Linspace::new(2., 5., 1).collect::<Vec<_>>(), vec![2.]);
    assert_eq!(Linspace::new(2., 5., 0).count(), 0);

    let points = Linspace::new(0., 2.5, 26);

    assert_eq!(points.len(), 26);
    assert_eq!(points.last(), Some(2.5));
}
