//! Integration tests for building and running validators.

use serde_json::json;
use verdict::{
    BundleMessageFormatter, Constraint, ConstraintViolations, Locale, Validator,
};

struct User {
    name: String,
    age: i32,
}

fn user_validator() -> Validator<User> {
    Validator::<User>::builder()
        .string("name", |u: &User| Some(u.name.as_str()), |c| c.not_blank())
        .number("age", |u: &User| Some(&u.age), |c| c.greater_than_or_equal(0))
        .build()
}

fn keys(violations: &ConstraintViolations) -> Vec<&str> {
    violations.iter().map(|v| v.message_key()).collect()
}

fn names(violations: &ConstraintViolations) -> Vec<&str> {
    violations.iter().map(|v| v.name()).collect()
}

#[test]
fn test_violations_follow_registration_order() {
    let violations = user_validator().validate(&User {
        name: "".into(),
        age: -1,
    });

    assert_eq!(violations.len(), 2);
    assert_eq!(names(&violations), vec!["name", "age"]);
    assert_eq!(keys(&violations), vec!["charSequence.notBlank", "numeric.greaterThanOrEqual"]);
    assert_eq!(
        violations.messages(),
        vec![
            "\"name\" must not be blank",
            "\"age\" must be greater than or equal to 0",
        ]
    );
}

#[test]
fn test_valid_input_has_no_violations() {
    let violations = user_validator().validate(&User {
        name: "Alice".into(),
        age: 30,
    });
    assert!(violations.is_valid());
    assert!(violations.into_result().is_ok());
}

#[test]
fn test_predicate_order_within_a_field() {
    struct Signup {
        username: Option<String>,
    }

    let validator = Validator::<Signup>::builder()
        .string(
            "username",
            |s: &Signup| s.username.as_deref(),
            |c| c.not_blank().greater_than_or_equal(3).starts_with("@"),
        )
        .build();

    let violations = validator.validate(&Signup {
        username: Some("x".into()),
    });
    assert_eq!(
        keys(&violations),
        vec!["container.greaterThanOrEqual", "charSequence.startsWith"]
    );
    assert_eq!(
        violations.messages()[0],
        "The size of \"username\" must be greater than or equal to 3. The given size is 1"
    );

    let violations = validator.validate(&Signup { username: None });
    assert_eq!(keys(&violations), vec!["charSequence.notBlank"]);
    assert_eq!(violations.get(0).unwrap().violated_value(), &json!(null));
}

#[test]
fn test_violation_arguments() {
    let violations = user_validator().validate(&User {
        name: "ok".into(),
        age: -4,
    });
    let violation = violations.get(0).unwrap();
    assert_eq!(violation.args(), &[json!("age"), json!(0), json!(-4)]);
    assert_eq!(violation.default_message_format(), "\"{0}\" must be greater than or equal to {1}");
}

#[test]
fn test_details_projection() {
    let violations = user_validator().validate(&User {
        name: " ".into(),
        age: 1,
    });
    let details = violations.details();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].key, "charSequence.notBlank");
    assert_eq!(details[0].args, vec![json!("name"), json!(" ")]);
    assert_eq!(details[0].default_message, "\"name\" must not be blank");
    assert_eq!(
        serde_json::to_value(&details[0]).unwrap(),
        json!({
            "key": "charSequence.notBlank",
            "args": ["name", " "],
            "default_message": "\"name\" must not be blank"
        })
    );
}

#[test]
fn test_into_result_error() {
    let err = user_validator()
        .validate(&User {
            name: "".into(),
            age: -1,
        })
        .into_result()
        .unwrap_err();
    assert!(err.to_string().starts_with("Constraint violations found!"));
    assert_eq!(err.into_violations().len(), 2);
}

struct Address {
    city: String,
    zip: Option<String>,
}

struct Customer {
    address: Option<Address>,
    shipping: Option<Address>,
}

fn address_validator() -> Validator<Address> {
    Validator::<Address>::builder()
        .string("city", |a: &Address| Some(a.city.as_str()), |c| c.not_blank())
        .string("zip", |a: &Address| a.zip.as_deref(), |c| c.not_null().fixed_size(5))
        .build()
}

#[test]
fn test_nested_names_are_prefixed() {
    let validator = Validator::<Customer>::builder()
        .nest("address", |c: &Customer| c.address.as_ref(), address_validator())
        .nest_if_present("shipping", |c: &Customer| c.shipping.as_ref(), address_validator())
        .build();

    let violations = validator.validate(&Customer {
        address: Some(Address {
            city: "".into(),
            zip: Some("123".into()),
        }),
        shipping: Some(Address {
            city: "Tokyo".into(),
            zip: None,
        }),
    });
    assert_eq!(names(&violations), vec!["address.city", "address.zip", "shipping.zip"]);
    assert_eq!(violations.get(2).unwrap().message(), "\"shipping.zip\" must not be null");
}

#[test]
fn test_absent_nested_values() {
    let validator = Validator::<Customer>::builder()
        .nest("address", |c: &Customer| c.address.as_ref(), address_validator())
        .nest_if_present("shipping", |c: &Customer| c.shipping.as_ref(), address_validator())
        .build();

    let violations = validator.validate(&Customer {
        address: None,
        shipping: None,
    });
    assert_eq!(names(&violations), vec!["address"]);
    assert_eq!(keys(&violations), vec!["object.notNull"]);
}

#[test]
fn test_deeply_nested_names() {
    struct Company {
        ceo: Customer,
    }

    let customer = Validator::<Customer>::builder()
        .nest("address", |c: &Customer| c.address.as_ref(), address_validator())
        .build();
    let validator = Validator::<Company>::builder()
        .nest("ceo", |c: &Company| Some(&c.ceo), customer)
        .message_key_separator("/")
        .build();

    let violations = validator.validate(&Company {
        ceo: Customer {
            address: Some(Address {
                city: "".into(),
                zip: Some("12345".into()),
            }),
            shipping: None,
        },
    });
    assert_eq!(names(&violations), vec!["ceo/address/city"]);
}

struct Item {
    name: String,
    qty: i32,
}

struct Order {
    items: Vec<Item>,
    gifts: Option<Vec<Item>>,
}

fn item_validator() -> Validator<Item> {
    Validator::<Item>::builder()
        .string("name", |i: &Item| Some(i.name.as_str()), |c| c.not_empty())
        .number("qty", |i: &Item| Some(&i.qty), |c| c.positive())
        .build()
}

#[test]
fn test_for_each_indexes_names() {
    let validator = Validator::<Order>::builder()
        .for_each("items", |o: &Order| Some(o.items.as_slice()), item_validator())
        .for_each_if_present("gifts", |o: &Order| o.gifts.as_deref(), item_validator())
        .build();

    let violations = validator.validate(&Order {
        items: vec![
            Item {
                name: "pen".into(),
                qty: 1,
            },
            Item {
                name: "".into(),
                qty: 0,
            },
        ],
        gifts: None,
    });
    assert_eq!(names(&violations), vec!["items[1].name", "items[1].qty"]);
    assert_eq!(violations.messages()[1], "\"items[1].qty\" must be positive");

    let by_name = violations.by_name();
    assert_eq!(by_name.len(), 2);
}

#[test]
fn test_for_each_on_absent_collection() {
    struct Basket {
        items: Option<Vec<Item>>,
    }

    let required = Validator::<Basket>::builder()
        .for_each("items", |b: &Basket| b.items.as_deref(), item_validator())
        .build();
    let optional = Validator::<Basket>::builder()
        .for_each_if_present("items", |b: &Basket| b.items.as_deref(), item_validator())
        .build();

    let basket = Basket { items: None };
    assert_eq!(keys(&required.validate(&basket)), vec!["object.notNull"]);
    assert!(optional.validate(&basket).is_valid());
}

#[test]
fn test_container_field() {
    struct Post {
        tags: Vec<String>,
    }

    let validator = Validator::<Post>::builder()
        .container("tags", |p: &Post| Some(&p.tags), |c| c.not_empty().less_than_or_equal(2))
        .build();

    let violations = validator.validate(&Post { tags: Vec::new() });
    assert_eq!(violations.messages(), vec!["\"tags\" must not be empty"]);

    let violations = validator.validate(&Post {
        tags: vec!["a".into(), "b".into(), "c".into()],
    });
    assert_eq!(violations.get(0).unwrap().violated_value(), &json!(3));
}

#[test]
fn test_cross_field_rule() {
    struct Password {
        password: String,
        confirm: String,
    }

    let validator = Validator::<Password>::builder()
        .string("password", |p: &Password| Some(p.password.as_str()), |c| c.greater_than_or_equal(8))
        .constraint_on_target(
            |p: &Password| p.password == p.confirm,
            "confirm",
            "password.confirm",
            "\"{0}\" must match the password",
        )
        .build();

    let violations = validator.validate(&Password {
        password: "longenough".into(),
        confirm: "different".into(),
    });
    assert_eq!(violations.messages(), vec!["\"confirm\" must match the password"]);
}

#[test]
fn test_locale_specific_messages() {
    let formatter = BundleMessageFormatter::new()
        .with_message(Locale::new("ja"), "charSequence.notBlank", "「{0}」が空白です")
        .with_message(Locale::new("ja"), "numeric.greaterThanOrEqual", "「{0}」は{1}以上である必要があります");

    let validator = Validator::<User>::builder()
        .string("name", |u: &User| Some(u.name.as_str()), |c| c.not_blank())
        .number("age", |u: &User| Some(&u.age), |c| c.greater_than_or_equal(0))
        .message_formatter(formatter)
        .build();

    let user = User {
        name: "".into(),
        age: -1,
    };

    let violations = validator.validate_with_locale(&user, &Locale::new("ja-JP"));
    assert_eq!(
        violations.messages(),
        vec!["「name」が空白です", "「age」は0以上である必要があります"]
    );
    assert_eq!(violations.get(0).unwrap().locale(), &Locale::new("ja-JP"));

    let violations = validator.validate(&user);
    assert_eq!(violations.messages()[0], "\"name\" must not be blank");
}

#[test]
fn test_message_override() {
    let validator = Validator::<User>::builder()
        .string("name", |u: &User| Some(u.name.as_str()), |c| {
            c.not_blank().message("please tell us your {0}")
        })
        .build();

    let violations = validator.validate(&User {
        name: "".into(),
        age: 0,
    });
    assert_eq!(violations.messages(), vec!["please tell us your name"]);
    assert_eq!(violations.get(0).unwrap().message_key(), "charSequence.notBlank");
}

#[test]
#[should_panic(expected = "boom")]
fn test_panicking_predicate_propagates() {
    let validator = Validator::<User>::builder()
        .string("name", |u: &User| Some(u.name.as_str()), |c| {
            c.predicate(|_: &str| panic!("boom"), "never", "never")
        })
        .build();

    let _ = validator.validate(&User {
        name: "x".into(),
        age: 0,
    });
}

#[test]
fn test_validator_is_reusable() {
    let validator = user_validator();
    for age in -3..3 {
        let violations = validator.validate(&User {
            name: "Bob".into(),
            age,
        });
        assert_eq!(violations.is_valid(), age >= 0);
    }
}
