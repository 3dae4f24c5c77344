//! Unit tests for the verification flow controller

use std::sync::Arc;

use crate::domain::entities::account::AccountRole;
use crate::domain::entities::channel::Channel;
use crate::domain::entities::verification_code::{CODE_MAX, CODE_MIN};
use crate::errors::{FlowError, RegistrationError};
use crate::services::verification::{
    Panel, RegistrationForm, Stage, VerificationFlowConfig, VerificationFlowController, ViewDirective,
};

use super::mocks::{MockAccounts, MockDelivery, SequenceGenerator};

type Controller = VerificationFlowController<MockDelivery, MockAccounts>;

fn setup() -> (Controller, Arc<MockDelivery>, Arc<MockAccounts>) {
    let delivery = Arc::new(MockDelivery::new());
    let accounts = Arc::new(MockAccounts::new(false));
    let controller = VerificationFlowController::new(
        delivery.clone(),
        accounts.clone(),
        VerificationFlowConfig::default(),
    );
    (controller, delivery, accounts)
}

fn form(email: &str, phone: &str, password: &str) -> RegistrationForm {
    RegistrationForm {
        display_name: None,
        email: Some(email.to_string()),
        phone: Some(phone.to_string()),
        password: password.to_string(),
        robot_attested: true,
    }
}

#[test]
fn test_email_only_submission_issues_one_code() {
    let (mut controller, delivery, _) = setup();
    controller.select_role(AccountRole::Citizen);

    controller.submit_registration(form("a@b.com", "", "secret1")).unwrap();

    assert_eq!(delivery.total(), 1);
    assert_eq!(delivery.count(Channel::Email), 1);
    let required = controller.session().required_channels();
    assert_eq!(required.iter().collect::<Vec<_>>(), vec![Channel::Email]);

    let code = delivery.last_code(Channel::Email).unwrap();
    controller.verify_channel(Channel::Email, &code).unwrap();
    assert!(controller.is_ready_to_finalize());
}

#[test]
fn test_issued_codes_are_four_digits_in_range() {
    let (mut controller, delivery, _) = setup();
    controller.select_role(AccountRole::Authority);
    controller
        .submit_registration(form("a@b.com", "5551234567", "secret1"))
        .unwrap();

    for channel in Channel::ALL {
        let code = delivery.last_code(channel).unwrap();
        assert_eq!(code.len(), 4);
        let value: u32 = code.parse().unwrap();
        assert!((CODE_MIN..=CODE_MAX).contains(&value));
    }
}

#[test]
fn test_delivery_receives_trimmed_contact() {
    let (mut controller, delivery, _) = setup();
    controller.select_role(AccountRole::Citizen);
    controller.submit_registration(form("  a@b.com ", "", "secret1")).unwrap();

    let sent = delivery.sent.lock().unwrap().clone();
    assert_eq!(sent[0].0, Channel::Email);
    assert_eq!(sent[0].1, "a@b.com");
}

#[test]
fn test_both_channels_required_in_either_order() {
    for first in Channel::ALL {
        let (mut controller, delivery, _) = setup();
        controller.select_role(AccountRole::Authority);
        controller
            .submit_registration(form("a@b.com", "5551234567", "secret1"))
            .unwrap();
        assert_eq!(delivery.total(), 2);

        let second = if first == Channel::Email { Channel::Phone } else { Channel::Email };

        let directives = controller
            .verify_channel(first, &delivery.last_code(first).unwrap())
            .unwrap();
        assert!(!directives.contains(&ViewDirective::ShowFinalizeAction));
        assert!(!controller.is_ready_to_finalize());
        assert!(controller.finalize_account().is_err());

        let directives = controller
            .verify_channel(second, &delivery.last_code(second).unwrap())
            .unwrap();
        assert!(directives.contains(&ViewDirective::ShowFinalizeAction));
        assert!(controller.is_ready_to_finalize());
    }
}

#[test]
fn test_empty_contacts_issue_no_codes() {
    let (mut controller, delivery, _) = setup();
    controller.select_role(AccountRole::Citizen);

    let error = controller.submit_registration(form("", "", "secret1")).unwrap_err();

    assert_eq!(error, FlowError::Registration(RegistrationError::NoContactChannel));
    assert_eq!(delivery.total(), 0);
    assert_eq!(controller.session().stage(), Stage::Details);
    assert_eq!(
        controller.session().last_error(),
        Some("Please provide an email or phone number.")
    );
}

#[test]
fn test_five_character_password_rejected_for_any_contacts() {
    for (email, phone) in [("a@b.com", ""), ("", "5551234567"), ("a@b.com", "5551234567")] {
        let (mut controller, delivery, _) = setup();
        controller.select_role(AccountRole::Citizen);

        let error = controller.submit_registration(form(email, phone, "12345")).unwrap_err();

        assert_eq!(
            error,
            FlowError::Registration(RegistrationError::PasswordTooShort { min_length: 6 })
        );
        assert_eq!(delivery.total(), 0);
        assert!(controller.session().required_channels().is_empty());
    }
}

#[test]
fn test_submit_without_role() {
    let (mut controller, delivery, _) = setup();

    let error = controller.submit_registration(form("a@b.com", "", "secret1")).unwrap_err();

    assert_eq!(error.user_message().as_deref(), Some("Please select a role."));
    assert_eq!(delivery.total(), 0);
    assert_eq!(controller.session().stage(), Stage::RoleSelection);
}

#[test]
fn test_submit_without_robot_check() {
    let (mut controller, delivery, _) = setup();
    controller.select_role(AccountRole::Citizen);
    let mut unattested = form("a@b.com", "", "secret1");
    unattested.robot_attested = false;

    let error = controller.submit_registration(unattested).unwrap_err();

    assert_eq!(error, FlowError::Registration(RegistrationError::RobotCheckMissing));
    assert_eq!(delivery.total(), 0);
}

#[test]
fn test_wrong_code_keeps_state() {
    let (mut controller, delivery, _) = setup();
    controller.select_role(AccountRole::Authority);
    controller
        .submit_registration(form("a@b.com", "5551234567", "secret1"))
        .unwrap();
    controller
        .verify_channel(Channel::Phone, &delivery.last_code(Channel::Phone).unwrap())
        .unwrap();
    let required = controller.session().required_channels();

    let email_code = delivery.last_code(Channel::Email).unwrap();
    let wrong = if email_code == "1000" { "1001" } else { "1000" };
    let error = controller.verify_channel(Channel::Email, wrong).unwrap_err();

    assert_eq!(error, FlowError::CodeMismatch { channel: Channel::Email });
    assert!(controller.session().verified_channels().contains(Channel::Phone));
    assert!(!controller.session().verified_channels().contains(Channel::Email));
    assert_eq!(controller.session().required_channels(), required);
    assert!(!controller.is_ready_to_finalize());
}

#[test]
fn test_finalize_before_ready_is_contract_violation() {
    let (mut controller, _, accounts) = setup();
    controller.select_role(AccountRole::Citizen);
    controller.submit_registration(form("a@b.com", "", "secret1")).unwrap();

    let error = controller.finalize_account().unwrap_err();

    assert!(matches!(error, FlowError::ContractViolation { .. }));
    assert!(error.user_message().is_none());
    assert!(controller.session().last_error().is_none());
    assert!(accounts.created().is_empty());
    assert_eq!(controller.session().stage(), Stage::Verification);
}

#[test]
fn test_delivery_failure_leaves_session_in_details() {
    let delivery = Arc::new(MockDelivery::failing_on(Channel::Phone));
    let accounts = Arc::new(MockAccounts::new(false));
    let mut controller =
        VerificationFlowController::new(delivery.clone(), accounts, VerificationFlowConfig::default());
    controller.select_role(AccountRole::Citizen);

    let error = controller
        .submit_registration(form("a@b.com", "5551234567", "secret1"))
        .unwrap_err();

    assert!(matches!(error, FlowError::Delivery { channel: Channel::Phone, .. }));
    assert_eq!(controller.session().stage(), Stage::Details);
    assert!(controller.session().issued_code(Channel::Email).is_none());
    assert_eq!(
        controller.session().last_error(),
        Some("Could not deliver the verification code. Please try again.")
    );
}

#[test]
fn test_account_creation_failure_keeps_ready_state() {
    let delivery = Arc::new(MockDelivery::new());
    let accounts = Arc::new(MockAccounts::new(true));
    let mut controller =
        VerificationFlowController::new(delivery.clone(), accounts, VerificationFlowConfig::default());
    controller.select_role(AccountRole::Citizen);
    controller.submit_registration(form("a@b.com", "", "secret1")).unwrap();
    controller
        .verify_channel(Channel::Email, &delivery.last_code(Channel::Email).unwrap())
        .unwrap();

    let error = controller.finalize_account().unwrap_err();

    assert!(matches!(error, FlowError::AccountCreation { .. }));
    assert!(controller.is_ready_to_finalize());
    assert_eq!(
        controller.session().last_error(),
        Some("Account creation failed. Please try again.")
    );
}

#[test]
fn test_codes_not_reusable_after_reset() {
    let delivery = Arc::new(MockDelivery::new());
    let accounts = Arc::new(MockAccounts::new(false));
    let mut controller =
        VerificationFlowController::new(delivery.clone(), accounts, VerificationFlowConfig::default())
            .with_code_generator(SequenceGenerator::new(&["1234", "5678"]));

    controller.select_role(AccountRole::Citizen);
    controller.submit_registration(form("a@b.com", "", "secret1")).unwrap();
    controller.reset();

    controller.select_role(AccountRole::Citizen);
    controller.submit_registration(form("c@d.com", "", "secret1")).unwrap();

    let error = controller.verify_channel(Channel::Email, "1234").unwrap_err();
    assert_eq!(error, FlowError::CodeMismatch { channel: Channel::Email });
    controller.verify_channel(Channel::Email, "5678").unwrap();
    assert!(controller.is_ready_to_finalize());
}

#[test]
fn test_codes_not_reusable_after_finalize() {
    let delivery = Arc::new(MockDelivery::new());
    let accounts = Arc::new(MockAccounts::new(false));
    let mut controller =
        VerificationFlowController::new(delivery.clone(), accounts.clone(), VerificationFlowConfig::default())
            .with_code_generator(SequenceGenerator::new(&["4321", "8765"]));

    controller.select_role(AccountRole::Citizen);
    controller.submit_registration(form("a@b.com", "", "secret1")).unwrap();
    controller.verify_channel(Channel::Email, "4321").unwrap();
    controller.finalize_account().unwrap();

    controller.select_role(AccountRole::Admin);
    controller.submit_registration(form("", "5551234567", "secret1")).unwrap();

    assert!(controller.verify_channel(Channel::Phone, "4321").is_err());
    assert_eq!(delivery.last_code(Channel::Phone).as_deref(), Some("8765"));
    assert_eq!(accounts.created().len(), 1);
}

#[test]
fn test_resubmission_issues_fresh_codes() {
    let delivery = Arc::new(MockDelivery::new());
    let accounts = Arc::new(MockAccounts::new(false));
    let mut controller =
        VerificationFlowController::new(delivery.clone(), accounts, VerificationFlowConfig::default())
            .with_code_generator(SequenceGenerator::new(&["1111", "2222", "3333", "4444"]));

    controller.select_role(AccountRole::Authority);
    controller
        .submit_registration(form("a@b.com", "5551234567", "secret1"))
        .unwrap();
    controller.verify_channel(Channel::Email, "1111").unwrap();

    controller
        .submit_registration(form("a@b.com", "5551234567", "secret1"))
        .unwrap();

    assert!(controller.session().verified_channels().is_empty());
    assert_eq!(delivery.total(), 4);
    assert!(controller.verify_channel(Channel::Email, "1111").is_err());
    controller.verify_channel(Channel::Email, "3333").unwrap();
    controller.verify_channel(Channel::Phone, "4444").unwrap();
    assert!(controller.is_ready_to_finalize());
}

#[test]
fn test_panel_toggles_keep_session() {
    let (mut controller, _, _) = setup();

    assert_eq!(
        controller.show_sign_up(),
        vec![ViewDirective::ShowPanel { panel: Panel::SignUp }]
    );
    controller.select_role(AccountRole::Citizen);
    controller.show_sign_in();

    assert_eq!(controller.session().panel(), Panel::SignIn);
    assert_eq!(controller.session().role(), Some(AccountRole::Citizen));
    assert_eq!(controller.session().stage(), Stage::Details);
}

#[test]
fn test_citizen_email_scenario() {
    let delivery = Arc::new(MockDelivery::new());
    let accounts = Arc::new(MockAccounts::new(false));
    let mut controller =
        VerificationFlowController::new(delivery.clone(), accounts.clone(), VerificationFlowConfig::default())
            .with_code_generator(SequenceGenerator::new(&["7302"]));

    controller.show_sign_up();
    controller.select_role(AccountRole::Citizen);
    controller.submit_registration(form("a@b.com", "", "secret1")).unwrap();
    assert_eq!(
        controller.session().required_channels().iter().collect::<Vec<_>>(),
        vec![Channel::Email]
    );

    let error = controller.verify_channel(Channel::Email, "0000").unwrap_err();
    assert_eq!(error.user_message().as_deref(), Some("Incorrect Email OTP."));
    assert!(!controller.session().verified_channels().contains(Channel::Email));

    let directives = controller.verify_channel(Channel::Email, "7302").unwrap();
    assert!(directives.contains(&ViewDirective::ShowFinalizeAction));
    assert!(directives.contains(&ViewDirective::ClearError));

    let result = controller.finalize_account().unwrap();
    assert!(result.directives.contains(&ViewDirective::ShowPanel { panel: Panel::SignIn }));
    assert_eq!(controller.session().panel(), Panel::SignIn);
    assert_eq!(controller.session().stage(), Stage::RoleSelection);
    assert!(controller.session().role().is_none());

    let created = accounts.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].role, AccountRole::Citizen);
    assert_eq!(created[0].email.as_deref(), Some("a@b.com"));
    assert_eq!(created[0].phone, None);
}

#[test]
fn test_authority_two_channel_scenario() {
    let delivery = Arc::new(MockDelivery::new());
    let accounts = Arc::new(MockAccounts::new(false));
    let mut controller =
        VerificationFlowController::new(delivery.clone(), accounts, VerificationFlowConfig::default())
            .with_code_generator(SequenceGenerator::new(&["1357", "2468"]));

    controller.select_role(AccountRole::Authority);
    controller
        .submit_registration(form("a@b.com", "5551234567", "secret1"))
        .unwrap();
    assert_eq!(delivery.last_code(Channel::Email).as_deref(), Some("1357"));
    assert_eq!(delivery.last_code(Channel::Phone).as_deref(), Some("2468"));

    controller.verify_channel(Channel::Phone, "2468").unwrap();
    assert!(!controller.is_ready_to_finalize());

    controller.verify_channel(Channel::Email, "1357").unwrap();
    assert!(controller.is_ready_to_finalize());
}

#[test]
fn test_error_directive_carries_user_message() {
    let (mut controller, _, _) = setup();

    let err = controller
        .submit_registration(form("a@b.com", "", "secret1"))
        .unwrap_err();
    assert_eq!(
        ViewDirective::for_error(&err),
        Some(ViewDirective::ShowError {
            message: "Please select a role.".to_string()
        })
    );

    let err = controller.finalize_account().unwrap_err();
    assert!(matches!(err, FlowError::ContractViolation { .. }));
    assert_eq!(ViewDirective::for_error(&err), None);
}
