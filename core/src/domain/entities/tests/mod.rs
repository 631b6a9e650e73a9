mod otp_token_tests;
