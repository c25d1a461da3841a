#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::ocr::error::OcrError;

    #[test]
    fn test_ocr_error_types() {
        let err = OcrError::TesseractNotInstalled;
        assert_eq!(err.error_code(), "OCR_NOT_INSTALLED");
        assert!(!err.is_recoverable());
        assert!(err.is_configuration_error());

        let err = OcrError::OcrTimeout { seconds: 60 };
        assert_eq!(err.error_code(), "OCR_TIMEOUT");
        assert!(err.is_recoverable());
        assert!(!err.is_configuration_error());

        let err = OcrError::LanguageDataNotFound { lang: "deu".to_string() };
        assert!(err.to_string().contains("deu"));
        assert!(err.is_configuration_error());

        let err = OcrError::InvalidImageFormat { details: "truncated".to_string() };
        assert_eq!(err.error_code(), "OCR_INVALID_FORMAT");
    }

    #[cfg(feature = "ocr")]
    mod preprocessing {
        use crate::config::Config;
        use crate::ocr::enhanced::EnhancedOcrService;
        use image::{ImageBuffer, Luma};

        fn service() -> EnhancedOcrService {
            EnhancedOcrService::new(Config::for_tests())
        }

        #[test]
        fn test_binarize_splits_at_threshold() {
            // for_tests() threshold is 150
            let img = ImageBuffer::from_fn(4, 1, |x, _| match x {
                0 => Luma([0u8]),
                1 => Luma([149u8]),
                2 => Luma([150u8]),
                _ => Luma([255u8]),
            });

            let out = service().binarize(&img);

            assert_eq!(out.get_pixel(0, 0)[0], 0);
            assert_eq!(out.get_pixel(1, 0)[0], 0);
            assert_eq!(out.get_pixel(2, 0)[0], 255);
            assert_eq!(out.get_pixel(3, 0)[0], 255);
        }

        #[test]
        fn test_boost_contrast_clamps_to_byte_range() {
            let img = ImageBuffer::from_fn(3, 1, |x, _| match x {
                0 => Luma([0u8]),
                1 => Luma([128u8]),
                _ => Luma([255u8]),
            });

            // multiplier 2.0: 0 -> -128 clamped to 0, 128 stays, 255 -> 382 clamped
            let out = service().boost_contrast(&img);

            assert_eq!(out.get_pixel(0, 0)[0], 0);
            assert_eq!(out.get_pixel(1, 0)[0], 128);
            assert_eq!(out.get_pixel(2, 0)[0], 255);
        }

        #[test]
        fn test_boost_contrast_pushes_midtones_apart() {
            let img = ImageBuffer::from_fn(2, 1, |x, _| {
                if x == 0 { Luma([100u8]) } else { Luma([160u8]) }
            });

            let out = service().boost_contrast(&img);

            // 100 -> 128 + (100-128)*2 = 72; 160 -> 128 + 32*2 = 192
            assert_eq!(out.get_pixel(0, 0)[0], 72);
            assert_eq!(out.get_pixel(1, 0)[0], 192);
        }

        #[test]
        fn test_binarized_image_survives_median_filter() {
            let uniform = ImageBuffer::from_pixel(8, 8, Luma([200u8]));
            let binarized = service().binarize(&uniform);
            let filtered = imageproc::filter::median_filter(&binarized, 1, 1);

            for pixel in filtered.pixels() {
                assert_eq!(pixel[0], 255);
            }
        }
    }

    #[tokio::test]
    #[cfg(feature = "ocr")]
    async fn test_unreadable_path_is_an_invalid_image_error() {
        use crate::ocr::enhanced::EnhancedOcrService;

        let service = EnhancedOcrService::new(Config::for_tests());
        let result = service
            .extract_text_from_image("/nonexistent/path/to/label.png")
            .await;

        match result {
            Err(OcrError::InvalidImageFormat { .. }) => {}
            other => panic!("expected InvalidImageFormat, got {:?}", other.map(|r| r.text)),
        }
    }

    #[tokio::test]
    #[cfg(not(feature = "ocr"))]
    async fn test_ocr_disabled_reports_not_installed() {
        use crate::ocr::enhanced::EnhancedOcrService;

        let service = EnhancedOcrService::new(Config::for_tests());
        let result = service.extract_text_from_image("label.png").await;
        assert!(matches!(result, Err(OcrError::TesseractNotInstalled)));
    }
}
