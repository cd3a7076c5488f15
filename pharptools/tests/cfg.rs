use pharptools::cfg::{self, translate, AcquisitionSettings, RawSettings, IN_PROGRESS};
use pharptools::Error;

fn raw() -> RawSettings {
    RawSettings {
        resolution: 16,
        sync_offset: -20,
        sync_divider: 4,
        cfd0_zero_cross: 8,
        cfd0_level: 120,
        cfd1_zero_cross: 9,
        cfd1_level: 130,
        acq_time_ms: 250,
    }
}

#[test]
fn translate_valid() {
    let s = translate(&raw(), 4, false).unwrap();
    assert_eq!(
        AcquisitionSettings {
            binning: 2,
            sync_offset: -20,
            sync_divider: 4,
            cfd0_zero_cross: 8,
            cfd0_level: 120,
            cfd1_zero_cross: 9,
            cfd1_level: 130,
            acq_time_ms: 250,
        },
        s
    );
    assert_eq!(raw(), RawSettings::from_settings(&s, 4).unwrap());
}

#[test]
fn rejected_while_active() {
    for r in [raw(), RawSettings { sync_divider: 0, ..raw() }, RawSettings::defaults(4)] {
        match translate(&r, 4, true) {
            Err(Error::Rejected { reason }) => assert_eq!(IN_PROGRESS, reason),
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}

#[test]
fn invalid_fields() {
    let r = RawSettings { sync_divider: 0, ..raw() };
    assert!(matches!(
        translate(&r, 4, false),
        Err(Error::InvalidSettings { field: "sync_divider", value: 0 })
    ));
    let r = RawSettings { acq_time_ms: 0, ..raw() };
    assert!(matches!(
        translate(&r, 4, false),
        Err(Error::InvalidSettings { field: "acq_time_ms", value: 0 })
    ));
    let r = RawSettings { resolution: 12, ..raw() };
    assert!(matches!(
        translate(&r, 4, false),
        Err(Error::InvalidResolution { resolution: 12, base: 4 })
    ));
}

#[test]
fn rejection_reads_differently_from_invalid() {
    let rejected = translate(&raw(), 4, true).unwrap_err().to_string();
    let invalid = translate(&RawSettings { sync_divider: 0, ..raw() }, 4, false)
        .unwrap_err()
        .to_string();
    assert!(rejected.contains(IN_PROGRESS));
    assert!(invalid.contains("sync_divider"));
    assert_ne!(rejected, invalid);
}

#[test]
fn defaults() {
    let d = cfg::defaults();
    assert_eq!(0, d.binning);
    assert_eq!(0, d.sync_offset);
    assert_eq!(1, d.sync_divider);
    assert_eq!((10, 50), (d.cfd0_zero_cross, d.cfd0_level));
    assert_eq!((10, 50), (d.cfd1_zero_cross, d.cfd1_level));
    assert_eq!(500, d.acq_time_ms);
    assert_eq!(4, RawSettings::defaults(4).resolution);
}

#[test]
fn de_partial_file() {
    let x = r#"{ "binning": 3, "acq_time_ms": 1000 }"#;
    let de = cfg::from_reader(x.as_bytes()).unwrap();
    let s = AcquisitionSettings {
        binning: 3,
        acq_time_ms: 1000,
        ..Default::default()
    };
    assert_eq!(s, de);
}

#[test]
fn de_full_file() {
    let s = translate(&raw(), 4, false).unwrap();
    let ser = serde_json::to_string(&s).unwrap();
    let de = cfg::from_reader(ser.as_bytes()).unwrap();
    assert_eq!(s, de);
}

#[test]
fn file_binning_out_of_range() {
    let e = cfg::from_reader(r#"{ "binning": 40 }"#.as_bytes()).unwrap_err();
    assert!(matches!(
        e.downcast_ref::<Error>(),
        Some(Error::InvalidSettings { field: "binning", value: 40 })
    ));
    assert!(cfg::from_reader(r#"{ "binning": 7 }"#.as_bytes()).is_ok());
}

#[test]
fn settings_without_raw_equivalent() {
    let s = AcquisitionSettings { binning: 40, ..Default::default() };
    assert!(matches!(
        RawSettings::from_settings(&s, 4),
        Err(Error::InvalidSettings { field: "binning", value: 40 })
    ));
    let s = AcquisitionSettings { sync_divider: u32::MAX, ..Default::default() };
    assert!(matches!(
        RawSettings::from_settings(&s, 4),
        Err(Error::InvalidSettings { field: "sync_divider", .. })
    ));
    let s = AcquisitionSettings { acq_time_ms: 1 << 31, ..Default::default() };
    assert!(matches!(
        RawSettings::from_settings(&s, 4),
        Err(Error::InvalidSettings { field: "acq_time_ms", value: 2147483648 })
    ));
    // coarsest step at the largest base still fits
    let s = AcquisitionSettings { binning: 7, ..Default::default() };
    let max = pharptools::res::MAX_BASE;
    assert_eq!(max << 7, RawSettings::from_settings(&s, max).unwrap().resolution);
}
