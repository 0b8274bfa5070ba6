mod checkout_tests;
