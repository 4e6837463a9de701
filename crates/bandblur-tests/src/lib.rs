//! Integration tests for the bandblur crates.
//!
//! End-to-end coverage of the interactions the unit tests can't see:
//! codec -> partition -> workers -> reassembly -> codec, and the headline
//! guarantee that the banded pipeline's output is byte-identical to a
//! sequential whole-image convolution.

#[cfg(test)]
mod tests {
    use bandblur_core::Canvas;
    use bandblur_filter::{convolve, Kernel};
    use bandblur_pipeline::{run::run, PipelineError, PipelineResult};
    use tempfile::tempdir;

    /// Deterministic non-uniform test image.
    fn test_canvas(width: u32, height: u32, depth: u16) -> Canvas {
        let mut c = Canvas::new(width, height, depth).unwrap();
        for (i, b) in c.data_mut().iter_mut().enumerate() {
            *b = ((i * 31 + i / 7) % 256) as u8;
        }
        c
    }

    fn gaussian_filter(kernel: &Kernel) -> impl Fn(&[u8], usize, usize, usize) -> PipelineResult<Vec<u8>> + Sync + '_ {
        move |px, w, h, bpp| {
            convolve(px, w, h, bpp, kernel).map_err(|e| PipelineError::Filter(e.to_string()))
        }
    }

    #[test]
    fn test_pipeline_matches_sequential_convolution() {
        let src = test_canvas(40, 120, 24);
        let kernel = Kernel::gaussian(1.0).unwrap();

        // Sequential reference: one convolution over the whole image
        let reference = convolve(
            src.data(),
            src.width() as usize,
            src.height() as usize,
            src.bytes_per_pixel(),
            &kernel,
        )
        .unwrap();

        for workers in [1usize, 2, 4] {
            let out = run(&src, workers, kernel.dim(), &gaussian_filter(&kernel)).unwrap();
            assert_eq!(
                out.data(),
                reference.as_slice(),
                "{workers}-worker pipeline diverged from sequential blur"
            );
        }
    }

    #[test]
    fn test_pipeline_matches_sequential_on_gray_images() {
        let src = test_canvas(25, 90, 8);
        let kernel = Kernel::gaussian(1.5).unwrap();
        let reference = convolve(src.data(), 25, 90, 1, &kernel).unwrap();
        let out = run(&src, 3, kernel.dim(), &gaussian_filter(&kernel)).unwrap();
        assert_eq!(out.data(), reference.as_slice());
    }

    #[test]
    fn test_identity_kernel_full_stack_roundtrip() {
        // write BMP -> read -> identity-blur through the pipeline -> write ->
        // read: every byte must survive
        let dir = tempdir().unwrap();
        let in_path = dir.path().join("in.bmp");
        let out_path = dir.path().join("out.bmp");

        let src = test_canvas(33, 80, 24);
        bandblur_io::bmp::write(&in_path, &src).unwrap();
        let loaded = bandblur_io::bmp::read(&in_path).unwrap();
        assert_eq!(loaded, src);

        let kernel = Kernel::identity(5).unwrap();
        let out = run(&loaded, 3, kernel.dim(), &gaussian_filter(&kernel)).unwrap();
        assert_eq!(out, src);

        bandblur_io::bmp::write(&out_path, &out).unwrap();
        let reread = bandblur_io::bmp::read(&out_path).unwrap();
        assert_eq!(reread, src);
    }

    #[test]
    fn test_blur_then_reread_is_deterministic() {
        let dir = tempdir().unwrap();
        let path_a = dir.path().join("a.bmp");
        let path_b = dir.path().join("b.bmp");

        let src = test_canvas(20, 64, 24);
        let kernel = Kernel::gaussian(2.0).unwrap();
        let out_a = run(&src, 2, kernel.dim(), &gaussian_filter(&kernel)).unwrap();
        let out_b = run(&src, 2, kernel.dim(), &gaussian_filter(&kernel)).unwrap();
        assert_eq!(out_a, out_b);

        bandblur_io::bmp::write(&path_a, &out_a).unwrap();
        bandblur_io::bmp::write(&path_b, &out_b).unwrap();
        assert_eq!(
            std::fs::read(&path_a).unwrap(),
            std::fs::read(&path_b).unwrap()
        );
    }

    #[test]
    fn test_blur_actually_blurs() {
        // A white stripe on black must bleed into its neighbors
        let mut src = Canvas::new(16, 60, 24).unwrap();
        for y in 28..32 {
            src.row_mut(y).unwrap().fill(255);
        }
        let kernel = Kernel::gaussian(1.0).unwrap();
        let out = run(&src, 2, kernel.dim(), &gaussian_filter(&kernel)).unwrap();

        let (r_edge, _, _) = out.get_pixel_rgb(8, 27).unwrap();
        let (r_far, _, _) = out.get_pixel_rgb(8, 10).unwrap();
        let (r_center, _, _) = out.get_pixel_rgb(8, 30).unwrap();
        assert!(r_edge > 0, "stripe should bleed past its edge");
        assert_eq!(r_far, 0, "far rows must stay black");
        assert!(r_center > r_edge, "stripe center must stay brightest");
    }

    #[test]
    fn test_sizing_error_reported_for_small_images() {
        let src = test_canvas(10, 10, 24);
        let kernel = Kernel::gaussian(1.0).unwrap(); // dim 7
        let err = run(&src, 5, kernel.dim(), &gaussian_filter(&kernel)).unwrap_err();
        assert!(matches!(err, PipelineError::SegmentTooSmall { .. }));
    }
}
