use std::sync::{Arc, Once};

use chrono::NaiveDate;
use logutil::{configure_global_logger, LogFormat};
use rayexec_bullet::array::Array;
use rayexec_bullet::datatype::{DataType, ListTypeMeta, TimeUnit, TimestampTypeMeta};
use rayexec_bullet::scalar::{OwnedScalarValue, ScalarValue, TimestampScalar};
use rayexec_bullet::selection::SelectionVector;
use rayexec_bullet::storage::{
    ContiguousVarlenStorage, GermanVarlenStorage, ListItemMetadata, ListStorage,
};
use rayexec_bullet::testutil::assert_arrays_eq;
use rayexec_functions::functions::scalar::find_scalar_function;

static LOGGING: Once = Once::new();

fn init_logging() {
    LOGGING.call_once(|| {
        configure_global_logger(tracing::Level::TRACE, LogFormat::HumanReadable).unwrap();
    });
}

fn list_type(element: DataType) -> DataType {
    DataType::List(ListTypeMeta::new(element))
}

/// Build a list scalar, using `None` for null elements.
fn list<T>(vals: impl IntoIterator<Item = Option<T>>) -> OwnedScalarValue
where
    T: Into<OwnedScalarValue>,
{
    ScalarValue::List(vals.into_iter().map(ScalarValue::from).collect())
}

/// Run `array_max` over an already built list array.
fn execute_array_max(input: Array) -> Array {
    init_logging();

    let func = find_scalar_function("array_max").unwrap();
    let planned = func.plan_from_datatypes(&[input.datatype().clone()]).unwrap();
    planned.execute(&[&Arc::new(input)]).unwrap()
}

/// Run `array_max` with one row per list in `lists`, and assert the output
/// matches `expected`.
fn assert_array_max(
    element: DataType,
    lists: impl IntoIterator<Item = OwnedScalarValue>,
    expected: impl IntoIterator<Item = OwnedScalarValue>,
) {
    let input = Array::try_from_scalars(list_type(element.clone()), lists).unwrap();
    let got = execute_array_max(input);

    let expected = Array::try_from_scalars(element, expected).unwrap();
    assert_arrays_eq(&expected, &got);
}

fn date(year: i32, month: u32, day: u32) -> OwnedScalarValue {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    ScalarValue::Date32(date.signed_duration_since(epoch).num_days() as i32)
}

fn ts(micros: i64) -> OwnedScalarValue {
    ScalarValue::Timestamp(TimestampScalar {
        unit: TimeUnit::Microsecond,
        value: micros,
    })
}

#[test]
fn boolean() {
    assert_array_max(
        DataType::Boolean,
        [
            list([Some(true), Some(false)]),
            list([Some(true)]),
            list([Some(false)]),
            list::<bool>([]),
            list([Some(true), Some(false), Some(true), None]),
            list([None, Some(true), Some(false), Some(true)]),
            list([Some(false), Some(false), Some(false)]),
            list([Some(true), Some(true), Some(true)]),
            list([Some(true), Some(false), None, Some(true)]),
            list::<bool>([None]),
            ScalarValue::Null,
        ],
        [
            ScalarValue::Boolean(true),
            ScalarValue::Boolean(true),
            ScalarValue::Boolean(false),
            ScalarValue::Null,
            ScalarValue::Boolean(true),
            ScalarValue::Boolean(true),
            ScalarValue::Boolean(false),
            ScalarValue::Boolean(true),
            ScalarValue::Boolean(true),
            ScalarValue::Null,
            ScalarValue::Null,
        ],
    );
}

#[test]
fn varchar() {
    assert_array_max(
        DataType::Utf8,
        [
            list([Some("red"), Some("blue")]),
            list([None, Some("blue"), Some("yellow"), Some("orange")]),
            list::<&str>([]),
            list::<&str>([None]),
        ],
        [
            ScalarValue::from("red"),
            ScalarValue::from("yellow"),
            ScalarValue::Null,
            ScalarValue::Null,
        ],
    );
}

#[test]
fn long_varchar() {
    assert_array_max(
        DataType::Utf8,
        [
            list([Some("red shiny car ahead"), Some("blue clear sky above")]),
            list([
                None,
                Some("blue clear sky above"),
                Some("yellow rose flowers"),
                Some("orange beautiful sunset"),
            ]),
            list::<&str>([]),
            list([
                Some("red shiny car ahead"),
                Some("purple is an elegant color"),
                Some("green plants make us happy"),
            ]),
        ],
        [
            ScalarValue::from("red shiny car ahead"),
            ScalarValue::from("yellow rose flowers"),
            ScalarValue::Null,
            ScalarValue::from("red shiny car ahead"),
        ],
    );
}

#[test]
fn varchar_mixed_lengths_and_shared_prefix() {
    assert_array_max(
        DataType::Utf8,
        [
            // Short value is a prefix of the long one.
            list([Some("yellow"), Some("yellow rose flowers")]),
            // Long values sharing the inline prefix.
            list([Some("abcd aaaaaaaaaaaaaa"), Some("abcd zzzzzzzzzzzzzz")]),
            list([Some(""), None]),
        ],
        [
            ScalarValue::from("yellow rose flowers"),
            ScalarValue::from("abcd zzzzzzzzzzzzzz"),
            ScalarValue::from(""),
        ],
    );
}

#[test]
fn binary() {
    let bytes = |b: &'static [u8]| Some(ScalarValue::Binary(b.into()));

    assert_array_max(
        DataType::Binary,
        [
            list([bytes(b"\x00\xff"), bytes(b"\x01"), None]),
            list([bytes(b"a long binary value exceeding inline"), bytes(b"a")]),
        ],
        [
            ScalarValue::Binary(b"\x01".as_slice().into()),
            ScalarValue::Binary(b"a long binary value exceeding inline".as_slice().into()),
        ],
    );
}

#[test]
fn text_storage_independent() {
    let values = [
        "blue clear sky above",
        "red",
        "red shiny car ahead",
        "orange",
        "yellow rose flowers",
    ];
    let metadata = vec![
        ListItemMetadata { offset: 0, len: 3 },
        ListItemMetadata { offset: 3, len: 2 },
        ListItemMetadata { offset: 5, len: 0 },
    ];

    let mut contiguous = ContiguousVarlenStorage::<i32>::with_offsets_and_data_capacity(5, 64);
    let mut large = ContiguousVarlenStorage::<i64>::with_offsets_and_data_capacity(5, 64);
    let mut german = GermanVarlenStorage::with_metadata_capacity(5);
    for v in values {
        contiguous.push(v.as_bytes()).unwrap();
        large.push(v.as_bytes()).unwrap();
        german.push(v.as_bytes()).unwrap();
    }

    let children = [
        Array::new_with_array_data(DataType::Utf8, contiguous),
        Array::new_with_array_data(DataType::Utf8, large),
        Array::new_with_array_data(DataType::Utf8, german),
    ];

    let expected = Array::try_from_scalars(
        DataType::Utf8,
        [
            ScalarValue::from("red shiny car ahead"),
            ScalarValue::from("yellow rose flowers"),
            ScalarValue::Null,
        ],
    )
    .unwrap();

    for child in children {
        let list = ListStorage::try_new(metadata.clone(), child).unwrap();
        let input = Array::new_with_array_data(list_type(DataType::Utf8), list);

        let got = execute_array_max(input);
        assert_arrays_eq(&expected, &got);
    }
}

#[test]
fn date32() {
    assert_array_max(
        DataType::Date32,
        [
            list([Some(date(1970, 1, 1)), Some(date(2023, 8, 23))]),
            list::<OwnedScalarValue>([]),
            list([Some(date(1970, 1, 1)), None]),
            list([Some(date(1969, 12, 31)), Some(date(1900, 1, 1))]),
        ],
        [
            date(2023, 8, 23),
            ScalarValue::Null,
            date(1970, 1, 1),
            date(1969, 12, 31),
        ],
    );
}

#[test]
fn timestamp() {
    let afternoon = NaiveDate::from_ymd_opt(2023, 8, 23)
        .unwrap()
        .and_hms_micro_opt(14, 30, 0, 250)
        .unwrap()
        .and_utc()
        .timestamp_micros();

    assert_array_max(
        DataType::Timestamp(TimestampTypeMeta::new(TimeUnit::Microsecond)),
        [
            list([Some(ts(0)), Some(ts(1))]),
            list([Some(ts(0)), Some(ts(1)), Some(ts(i64::MAX)), Some(ts(i64::MIN))]),
            list::<OwnedScalarValue>([]),
            list([Some(ts(0)), None]),
            list([Some(ts(afternoon)), Some(ts(afternoon - 1)), Some(ts(-1))]),
        ],
        [
            ts(1),
            ts(i64::MAX),
            ScalarValue::Null,
            ts(0),
            ts(afternoon),
        ],
    );
}

macro_rules! integral_tests {
    ($name:ident, $native:ty, $datatype:ident) => {
        #[test]
        fn $name() {
            let min = <$native>::MIN;
            let max = <$native>::MAX;

            assert_array_max(
                DataType::$datatype,
                [
                    list([Some(min), Some(0), Some(1), Some(2), Some(3), Some(max)]),
                    list([Some(max), Some(3), Some(2), Some(1), Some(0), Some(min)]),
                    list([Some(101), Some(102), Some(103), Some(max), None]),
                    list::<$native>([]),
                    list::<$native>([None]),
                    list([Some(min)]),
                ],
                [
                    ScalarValue::from(max),
                    ScalarValue::from(max),
                    ScalarValue::from(max),
                    ScalarValue::Null,
                    ScalarValue::Null,
                    ScalarValue::from(min),
                ],
            );
        }
    };
}

integral_tests!(integral_u8, u8, UInt8);
integral_tests!(integral_u16, u16, UInt16);
integral_tests!(integral_u32, u32, UInt32);
integral_tests!(integral_u64, u64, UInt64);

macro_rules! signed_integral_tests {
    ($name:ident, $native:ty, $datatype:ident) => {
        integral_tests!($name, $native, $datatype);

        mod $name {
            use super::*;

            #[test]
            fn negatives() {
                assert_array_max(
                    DataType::$datatype,
                    [
                        list([Some(<$native>::MAX), Some(0), Some(-1), Some(<$native>::MIN)]),
                        list([None, Some(-1), Some(-2), Some(-3), Some(<$native>::MIN)]),
                    ],
                    [
                        ScalarValue::from(<$native>::MAX),
                        ScalarValue::from(-1 as $native),
                    ],
                );
            }
        }
    };
}

signed_integral_tests!(integral_i8, i8, Int8);
signed_integral_tests!(integral_i16, i16, Int16);
signed_integral_tests!(integral_i32, i32, Int32);
signed_integral_tests!(integral_i64, i64, Int64);
signed_integral_tests!(integral_i128, i128, Int128);

macro_rules! floating_tests {
    ($name:ident, $native:ty, $datatype:ident) => {
        #[test]
        fn $name() {
            let min = <$native>::MIN;
            let max = <$native>::MAX;
            let nan = <$native>::NAN;

            let input = Array::try_from_scalars(
                list_type(DataType::$datatype),
                [
                    list([Some(0.0 as $native), Some(0.00001)]),
                    list([None, Some(1.1 as $native), Some(1.11), Some(-2.2), Some(-1.0), Some(min)]),
                    list([Some(min), Some(1.1 as $native), Some(1.22222), Some(1.33), None]),
                    list([Some(-0.00001 as $native), Some(-0.0002), Some(0.0001)]),
                    list::<$native>([]),
                    list::<$native>([None]),
                    list([Some(min), Some(-0.0001), Some(-0.0002), Some(-0.0003), Some(max), Some(nan)]),
                    list([Some(nan), Some(<$native>::INFINITY)]),
                    list([Some(<$native>::NEG_INFINITY), Some(min)]),
                ],
            )
            .unwrap();

            let got = execute_array_max(input);

            // NaN != NaN, so check the last rows separately.
            let expected = Array::try_from_scalars(
                DataType::$datatype,
                [
                    ScalarValue::from(0.00001 as $native),
                    ScalarValue::from(1.11 as $native),
                    ScalarValue::from(1.33 as $native),
                    ScalarValue::from(0.0001 as $native),
                    ScalarValue::Null,
                    ScalarValue::Null,
                ],
            )
            .unwrap();

            for idx in 0..expected.logical_len() {
                assert_eq!(
                    expected.logical_value(idx).unwrap(),
                    got.logical_value(idx).unwrap(),
                    "row {idx}"
                );
            }

            for idx in [6, 7] {
                match got.logical_value(idx).unwrap() {
                    ScalarValue::$datatype(v) => assert!(v.is_nan(), "row {idx}: {v}"),
                    other => panic!("row {idx}: unexpected value {other}"),
                }
            }

            assert_eq!(ScalarValue::from(min), got.logical_value(8).unwrap());
        }
    };
}

floating_tests!(floating_f32, f32, Float32);
floating_tests!(floating_f64, f64, Float64);

#[test]
fn signed_zero_keeps_first() {
    let input = Array::try_from_scalars(
        list_type(DataType::Float64),
        [
            list([Some(-0.0_f64), Some(0.0)]),
            list([Some(0.0_f64), Some(-0.0)]),
        ],
    )
    .unwrap();

    let got = execute_array_max(input);

    match got.logical_value(0).unwrap() {
        ScalarValue::Float64(v) => assert!(v == 0.0 && v.is_sign_negative()),
        other => panic!("unexpected {other}"),
    }
    match got.logical_value(1).unwrap() {
        ScalarValue::Float64(v) => assert!(v == 0.0 && v.is_sign_positive()),
        other => panic!("unexpected {other}"),
    }
}

#[test]
fn permutation_invariant() {
    let vals = [Some(4_i32), None, Some(-7), Some(19), Some(19), Some(0)];

    let mut rows = Vec::new();
    for rotation in 0..vals.len() {
        let mut rotated = vals.to_vec();
        rotated.rotate_left(rotation);
        rows.push(list(rotated.clone()));
        rotated.reverse();
        rows.push(list(rotated));
    }

    let expected: Vec<_> = rows.iter().map(|_| ScalarValue::Int32(19)).collect();
    assert_array_max(DataType::Int32, rows, expected);
}

#[test]
fn selected_rows() {
    let mut input = Array::try_from_scalars(
        list_type(DataType::Int64),
        [
            list([Some(1_i64), Some(5)]),
            ScalarValue::Null,
            list([Some(-3_i64)]),
        ],
    )
    .unwrap();
    input.select_mut(&SelectionVector::from_iter([2, 2, 1, 0]).into());

    let got = execute_array_max(input);

    let expected = Array::from_iter([Some(-3_i64), Some(-3), None, Some(5)]);
    assert_arrays_eq(&expected, &got);
}

#[test]
fn all_null_batch() {
    assert_array_max(
        DataType::Int32,
        [ScalarValue::Null, ScalarValue::Null],
        [ScalarValue::Null, ScalarValue::Null],
    );
}

#[test]
fn empty_batch() {
    assert_array_max(
        DataType::Utf8,
        Vec::<OwnedScalarValue>::new(),
        Vec::<OwnedScalarValue>::new(),
    );
}

#[test]
fn lookup_by_alias() {
    init_logging();

    let input = Array::try_from_scalars(
        list_type(DataType::Int16),
        [list([Some(3_i16), Some(9), None])],
    )
    .unwrap();

    let func = find_scalar_function("list_max").unwrap();
    let planned = func
        .plan_from_datatypes(&[list_type(DataType::Int16)])
        .unwrap();
    assert_eq!(DataType::Int16, planned.return_type());

    let got = planned.execute(&[&Arc::new(input)]).unwrap();
    assert_arrays_eq(&Array::from_iter([9_i16]), &got);
}

#[test]
fn bind_errors() {
    init_logging();

    let func = find_scalar_function("array_max").unwrap();
    func.plan_from_datatypes(&[DataType::Utf8]).unwrap_err();
    func.plan_from_datatypes(&[list_type(list_type(DataType::Int8))])
        .unwrap_err();
}

#[test]
fn invalid_utf8_element_errors() {
    let mut german = GermanVarlenStorage::with_metadata_capacity(2);
    german.push(b"valid").unwrap();
    german.push(&[0xff, 0xfe, 0xfd]).unwrap();

    let list = ListStorage::try_new(
        vec![ListItemMetadata { offset: 0, len: 2 }],
        Array::new_with_array_data(DataType::Utf8, german),
    )
    .unwrap();
    let input = Array::new_with_array_data(list_type(DataType::Utf8), list);

    init_logging();
    let planned = find_scalar_function("array_max")
        .unwrap()
        .plan_from_datatypes(&[list_type(DataType::Utf8)])
        .unwrap();

    let err = planned.execute(&[&Arc::new(input)]).unwrap_err();
    assert_eq!("Invalid utf8", err.get_msg());
}
