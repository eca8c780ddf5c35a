use tic_rs::payload::{StandardRecord, StatusRegister, TicDecode};
use tic_rs::tic::serial_mock::{encode_frame, MockTransport};
use tic_rs::{LinkConfig, TicMode, TicReader, TicRecord};

/// Linky single phase, BASE option, as sent in standard mode.
const LINKY_FRAME: &[&str] = &[
    "ADSC\t041876097177\tJ",
    "VTIC\t02\tJ",
    "DATE\tH221113153547\t\tD",
    "NGTF\t      BASE      \t<",
    "LTARF\t      BASE      \tF",
    "EAST\t040626660\t-",
    "EASF01\t040393601\t<",
    "EASF02\t000233059\t9",
    "EASF03\t000000000\t$",
    "EASD01\t040626660\t>",
    "EASD02\t000000000\t!",
    "IRMS1\t007\t5",
    "URMS1\t239\tH",
    "PREF\t06\tE",
    "PCOUP\t06\t_",
    "SINSTS\t01700\tN",
    "SMAXSN\tH221113002750\t01750\t2",
    "SMAXSN-1\tH221112151524\t01750\tS",
    "CCASN\tH221113150000\t01421\t3",
    "CCASN-1\tH221113140000\t01430\tP",
    "UMOY1\tH221113153000\t236\t,",
    "STGE\t00DA0001\tK",
    "MSG1\tPAS DE          MESSAGE         \t<",
    "PRM\t16140520874326\t2",
    "RELAIS\t001\tB",
    "NTARF\t01\tN",
    "NJOURF\t00\t&",
    "NJOURF+1\t00\tB",
    "PJOURF+1\t00008001 NONUTILE NONUTILE NONUTILE NONUTILE NONUTILE NONUTILE NONUTILE NONUTILE NONUTILE NONUTILE\t9",
];

#[test]
fn test_decode_linky_frame() {
    let record = StandardRecord::decode_lines(LINKY_FRAME);

    assert_eq!(record.adsc, "041876097177");
    assert_eq!(record.vtic, "02");
    assert_eq!(record.date.to_rfc3339(), "2022-11-13T15:35:47+01:00");
    assert_eq!(record.ngtf, "BASE");
    assert_eq!(record.east, 40626660);
    assert_eq!(record.easf01, 40393601);
    assert_eq!(record.easf02, 233059);
    assert_eq!(record.easd01, 40626660);
    assert_eq!(record.irms1, 7);
    assert_eq!(record.urms1, 239);
    assert_eq!(record.sinsts, 1700);
    assert_eq!(record.smaxsn, 1750);
    assert_eq!(record.smaxsn_ly, 1750);
    assert_eq!(record.ccasn, 1421);
    assert_eq!(record.ccasn_ly, 1430);
    assert_eq!(record.umoy1, 236);
    assert_eq!(record.msg1, "PAS DE MESSAGE");
    assert_eq!(record.prm, "16140520874326");
    assert_eq!(record.relays.relay1, 1);
    assert_eq!(record.ntarf, 1);
}

#[test]
fn test_status_register_from_frame() {
    let record = StandardRecord::decode_lines(LINKY_FRAME);

    // 0x00DA0001: bits 0, 17, 19, 20, 22, 23
    assert_eq!(record.stge, 0x00DA_0001);
    assert_eq!(record.status.dry_contact_status, 1);
    assert_eq!(record.status.cut_off_device_status, 0);
    assert_eq!(record.status.clock_status, 0);
    assert_eq!(record.status.tic_status, 1);
    assert_eq!(record.status.euridis_link_status, 3);
    assert_eq!(record.status.cpl_status, 2);
    assert_eq!(record.status.cpl_sync_status, 1);
    assert_eq!(record.status.tempo_contract_color_status, 0);
    assert_eq!(record.status.moving_peak_status, 0);
}

#[test]
fn test_decode_is_idempotent() {
    let first = StandardRecord::decode_lines(LINKY_FRAME);
    let second = StandardRecord::decode_lines(LINKY_FRAME);
    assert_eq!(first, second);
}

#[test]
fn test_last_value_wins() {
    let record = StandardRecord::decode_lines(&[
        "STGE\t00DA0001\tK",
        "SINSTS\t01700\tN",
        "STGE\t00000000\t!",
        "SINSTS\t00042\tN",
    ]);
    assert_eq!(record.sinsts, 42);
    assert_eq!(record.stge, 0);
    assert_eq!(record.status, StatusRegister::default());
}

#[tokio::test]
async fn test_read_through_reader() {
    let transport = MockTransport::new("/dev/ttyTIC").with_stream(9600, encode_frame(LINKY_FRAME));
    let reader = TicReader::new(transport, LinkConfig::STANDARD, TicMode::Standard);

    let record = reader.read_standard().await.unwrap();
    assert_eq!(record, StandardRecord::decode_lines(LINKY_FRAME));
}

#[tokio::test]
async fn test_historical_link_with_standard_fields() {
    // An explicit mode overrides what the baud rate suggests
    let transport = MockTransport::new("/dev/ttyTIC").with_stream(1200, encode_frame(LINKY_FRAME));
    let reader = TicReader::new(transport, LinkConfig::HISTORICAL, TicMode::Standard);

    let record = reader.read().await.unwrap();
    assert_eq!(record.meter_address(), "041876097177");
}

#[test]
fn test_serialize_record() {
    let record = TicRecord::Standard(Box::new(StandardRecord::decode_lines(LINKY_FRAME)));
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["mode"], "standard");
    assert_eq!(json["adsc"], "041876097177");
    assert_eq!(json["date"], "2022-11-13T15:35:47+01:00");
    assert_eq!(json["stge"], 0x00DA_0001);
    // Status and relay sub-fields are flattened into the record
    assert_eq!(json["tic_status"], 1);
    assert_eq!(json["relay1"], 1);
    assert_eq!(json["relay8"], 0);
    assert_eq!(json["msg1"], "PAS DE MESSAGE");
}
