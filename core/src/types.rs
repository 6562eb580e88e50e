/// Single coordinate axis, used for positions and the grid side length.
pub type Coord = u8;

/// Count type used for mine, flag and cell totals.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a square grid with the given side, saturating on overflow.
pub const fn square(side: Coord) -> CellCount {
    let side = side as CellCount;
    side.saturating_mul(side)
}

/// Iterates the up to 8 cells at Chebyshev distance 1 from `center`, clipped to a
/// `grid_size` x `grid_size` grid.
pub fn neighbors(center: Coord2, grid_size: Coord) -> impl Iterator<Item = Coord2> {
    let (x, y) = center;
    let last = grid_size.saturating_sub(1);
    let span = move |c: Coord| c.saturating_sub(1)..=c.saturating_add(1).min(last);

    span(y)
        .flat_map(move |ny| span(x).map(move |nx| (nx, ny)))
        .filter(move |&pos| pos != center)
}
