mod smoke_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Configuration, time formatting and the session facade
// - timetable_tests: Chart layout, scene and PNG output for whole days
// - web_tests: The HTTP board end to end, through the router
