pub mod synthetic_contour;
