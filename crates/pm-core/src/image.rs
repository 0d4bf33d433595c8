use crate::{Error, Point2i};

/// Borrowed single-channel binary mask.
pub type MaskView<'a> = ImageView<'a, u8>;

#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }
}

impl Image<u8> {
    /// Fills the closed axis-aligned rectangle `[x0, x1] x [y0, y1]`, clipped
    /// to the image.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, value: u8) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let x1 = x1.min(self.width - 1);
        let y1 = y1.min(self.height - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.data[y * self.width + x] = value;
            }
        }
    }
}

/// Borrowed row-major view with `width * height` elements.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.width + x;
        self.data.get(idx)
    }

    /// Pixel lookup by contour coordinate; negative coordinates are outside.
    pub fn get_at(&self, p: Point2i) -> Option<&'a T> {
        let x = usize::try_from(p.x).ok()?;
        let y = usize::try_from(p.y).ok()?;
        self.get(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::Image;
    use crate::{Error, Point2i};

    #[test]
    fn view_indexing_is_row_major() {
        let img = Image::from_vec(3, 2, vec![1u8, 2, 3, 4, 5, 6]).expect("valid image");
        let view = img.as_view();

        assert_eq!((view.width(), view.height()), (3, 2));
        assert_eq!(view.get(0, 1), Some(&4));
        assert_eq!(view.get(2, 1), Some(&6));
        assert_eq!(view.get(3, 1), None);
        assert_eq!(view.get(0, 2), None);
    }

    #[test]
    fn signed_lookup_rejects_negative_coordinates() {
        let img = Image::from_vec(2, 2, vec![0u8, 10, 20, 30]).expect("valid image");
        let view = img.as_view();

        assert_eq!(view.get_at(Point2i::new(1, 1)), Some(&30));
        assert_eq!(view.get_at(Point2i::new(-1, 0)), None);
        assert_eq!(view.get_at(Point2i::new(0, -1)), None);
        assert_eq!(view.get_at(Point2i::new(2, 0)), None);
    }

    #[test]
    fn construction_validates_sizes() {
        assert_eq!(
            Image::from_vec(2, 2, vec![0u8; 3]),
            Err(Error::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn fill_rect_clips_to_image() {
        let mut img = Image::new_fill(4, 3, 0u8);
        img.fill_rect(2, 1, 10, 10, 255);

        assert_eq!(img.data(), &[0, 0, 0, 0, 0, 0, 255, 255, 0, 0, 255, 255]);
    }
}
